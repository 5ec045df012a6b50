use rayon::{
    iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed source column and row for every destination pixel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScaleLut {
    xs: Vec<usize>,
    ys: Vec<usize>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Self {
        Self {
            xs: sample_axis(dst_w, src_w),
            ys: sample_axis(dst_h, src_h),
        }
    }

    pub fn dst_size(&self) -> (usize, usize) {
        (self.xs.len(), self.ys.len())
    }
}

/// Maps each destination index to the source index under its centre.
fn sample_axis(dst: usize, src: usize) -> Vec<usize> {
    if src == 0 {
        return vec![0; dst];
    }
    let ratio = src as f64 / dst as f64;
    (0..dst)
        .map(|i| (((i as f64 + 0.5) * ratio) as usize).min(src - 1))
        .collect()
}

/// Nearest-neighbour stretch of the internal frame onto the window buffer.
/// Rows are filled in parallel.
pub fn blit_nearest(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, lut: &ScaleLut) {
    if dw == 0 {
        return;
    }
    dst.par_chunks_mut(dw)
        .zip(lut.ys.par_iter())
        .for_each(|(dst_row, &sy)| {
            let row = &src[sy * sw..(sy + 1) * sw];
            for (px, &sx) in dst_row.iter_mut().zip(&lut.xs) {
                *px = row[sx];
            }
        });
}
