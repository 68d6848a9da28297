use super::*;
use crate::foundation::core::Canvas;

fn unit_grid() -> Grid {
    Grid {
        x_min: 0.0,
        x_max: 1.0,
        y_min: 0.0,
        y_max: 1.0,
        nx: 2,
        ny: 2,
    }
}

#[test]
fn band_index_is_monotone_and_bounded() {
    let mut prev = 0;
    for i in 0..=100 {
        let b = band_index(i as f64 / 100.0, 1.0, 7);
        assert!(b >= prev);
        assert!(b < 7);
        prev = b;
    }
    assert_eq!(band_index(0.0, 1.0, 7), 0);
    assert_eq!(band_index(1.0, 1.0, 7), 6);
    assert_eq!(band_index(0.5, 1.0, 2), 1);
    assert_eq!(band_index(0.49, 1.0, 2), 0);
}

#[test]
fn band_index_handles_flat_fields() {
    assert_eq!(band_index(0.3, 0.0, 5), 0);
    assert_eq!(band_index(f64::NAN, 1.0, 5), 0);
}

#[test]
fn bilinear_hits_lattice_values_and_midpoints() {
    let g = unit_grid();
    let values = Array2::from_shape_vec((2, 2), vec![0.0, 1.0, 2.0, 3.0]).unwrap();
    // values[[ix, iy]]: (0,0)=0, (0,1)=1, (1,0)=2, (1,1)=3
    assert_eq!(sample_bilinear(&values, &g, Point::new(0.0, 0.0)), Some(0.0));
    assert_eq!(sample_bilinear(&values, &g, Point::new(1.0, 0.0)), Some(2.0));
    assert_eq!(sample_bilinear(&values, &g, Point::new(0.0, 1.0)), Some(1.0));
    assert_eq!(sample_bilinear(&values, &g, Point::new(1.0, 1.0)), Some(3.0));
    let mid = sample_bilinear(&values, &g, Point::new(0.5, 0.5)).unwrap();
    assert!((mid - 1.5).abs() < 1e-12);
    assert_eq!(sample_bilinear(&values, &g, Point::new(1.5, 0.5)), None);
}

#[test]
fn contour_raster_covers_the_canvas() {
    let g = unit_grid();
    let values = Array2::from_shape_vec((2, 2), vec![0.0, 0.0, 1.0, 1.0]).unwrap();
    let view = PlotView::new(
        Canvas {
            width: 8,
            height: 4,
        },
        g.bounds(),
    )
    .unwrap();
    let px = contour_bands(&values, 1.0, &g, &view, 4, ColorMap::Greys);
    assert_eq!(px.len(), 32);
    // Density grows with x: the left column is the lightest band, the right the darkest.
    assert_eq!(px[0], ColorMap::Greys.band_color(0, 4));
    assert_eq!(px[7], ColorMap::Greys.band_color(3, 4));
}
