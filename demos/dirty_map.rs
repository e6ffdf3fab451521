use image::{Rgb, RgbImage};
use ndarray::{Array2, ArrayView2};
use palette::{Lch, Srgb};
use uv_dft::{MapGeometry, Visibilities};

pub fn main() {
    let shape = [128, 128];
    let geometry = MapGeometry {
        center: (0.0, 0.0),
        pixel_size: (1.0, 1.0),
    };

    // three point sources and a faint extended blob
    let mut sky = Array2::zeros(shape);
    sky[[40, 70]] = 1.0;
    sky[[64, 64]] = 0.6;
    sky[[90, 30]] = 0.8;
    for ((y, x), e) in sky.indexed_iter_mut() {
        let dy = y as f64 - 85.0;
        let dx = x as f64 - 95.0;
        *e += 0.05 * (-(dx * dx + dy * dy) / 50.0).exp();
    }
    save_real_image("dirty_map_sky.png", sky.view(), 1.0).unwrap();

    // nine rings of logarithmically spaced spatial frequencies, like a set of subcollimators
    let radii: Vec<f64> = (0..9).map(|i| 0.45 / (1.7f64).powi(i)).collect();
    let angles = 64;
    let uv = Array2::from_shape_fn((2, radii.len() * angles), |(row, i)| {
        let r = radii[i / angles];
        let theta = std::f64::consts::PI * (i % angles) as f64 / angles as f64;
        if row == 0 {
            r * theta.cos()
        } else {
            r * theta.sin()
        }
    });

    let vis = Visibilities::from_map(sky.view(), uv, &geometry).unwrap();
    println!("{} visibilities", vis.len());

    let dirty = vis.to_map(shape, &geometry).unwrap();
    save_real_image("dirty_map.png", dirty.view(), 1.0).unwrap();
}

pub fn save_real_image<T: AsRef<std::path::Path> + std::fmt::Debug>(
    file_name: T,
    arr: ArrayView2<f64>,
    amp: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    if let &[h, w, ..] = arr.shape() {
        let max: f64 = arr.iter().fold(f64::MIN, |max, &val| val.max(max));
        let min: f64 = arr.iter().fold(f64::MAX, |min, &val| val.min(min));
        let sum = arr.iter().fold(0.0, |sum, val| val + sum);
        println!("h:{} w:{} min:{} max:{} sum:{} - {:?}", h, w, min, max, sum, file_name);

        let mut img = RgbImage::new(w as u32, h as u32);
        let range = (max - min).max(f64::MIN_POSITIVE);

        for (x, y, p) in img.enumerate_pixels_mut() {
            let value = (arr[[y as usize, x as usize]] - min) / range;
            let value = (value * amp).min(1.0);

            let colour = Srgb::from(Lch::new(value * 70.0, value * 128.0, 280.0 - 245.0 * value));
            *p = Rgb([
                (colour.red * 255.0) as u8,
                (colour.green * 255.0) as u8,
                (colour.blue * 255.0) as u8,
            ]);
        }

        img.save(file_name)?;
    }
    Ok(())
}
