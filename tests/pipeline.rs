// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate nebulabrot;
extern crate num;
extern crate tempfile;

use nebulabrot::{render, AccumulationGrid, Color, Colorizer, NebulaRenderer, RenderConfig};
use num::Complex;
use tempfile::tempdir;

fn four_by_four() -> RenderConfig {
    RenderConfig {
        width: 4,
        height: 4,
        center: Complex::new(-0.5, 0.0),
        view_width: 4.0,
        iterations: 50,
        bailout: 3.0,
        oversampling: 1,
        ..RenderConfig::default()
    }
}

#[test]
fn four_by_four_scenario_terminates_with_a_full_image() {
    let image = render(&four_by_four()).unwrap();
    assert_eq!(image.width(), 4);
    assert_eq!(image.height(), 4);
    assert_eq!(image.pixels().len(), 16);
    assert_eq!(image.to_rgb_bytes().len(), 48);
}

#[test]
fn all_zero_grid_gives_a_uniform_image() {
    let grid = AccumulationGrid::new(4, 4);
    let image = Colorizer::default().colorize(&grid);
    assert_eq!(image.pixels().len(), 16);
    assert!(image.pixels().iter().all(|p| *p == Color::BLACK));
}

#[test]
fn view_with_no_retained_orbits_is_black() {
    // Far off to the right every seed escapes, so nothing is plotted.
    let config = RenderConfig {
        center: Complex::new(10.0, 10.0),
        view_width: 1.0,
        ..four_by_four()
    };
    let renderer = NebulaRenderer::new(&config).unwrap();
    let (grid, stats) = renderer.calculate();
    assert_eq!(stats.plotted, 0);
    assert!(grid.is_zero());
    let image = renderer.colorize(&grid);
    assert!(image.pixels().iter().all(|p| *p == Color::BLACK));
}

#[test]
fn identical_parameters_give_identical_bytes() {
    let config = RenderConfig {
        width: 24,
        height: 16,
        oversampling: 2,
        iterations: 200,
        ..four_by_four()
    };
    let first = render(&config).unwrap().to_rgb_bytes();
    let second = render(&config).unwrap().to_rgb_bytes();
    assert_eq!(first, second);
}

#[test]
fn invalid_parameters_are_rejected_before_rendering() {
    assert!(render(&RenderConfig { iterations: 0, ..four_by_four() }).is_err());
    assert!(render(&RenderConfig { bailout: -3.0, ..four_by_four() }).is_err());
    assert!(render(&RenderConfig { view_width: 0.0, ..four_by_four() }).is_err());
    assert!(render(&RenderConfig { width: 0, ..four_by_four() }).is_err());
}

#[test]
fn rendered_image_round_trips_through_the_sink() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nebula.bmp");
    let config = RenderConfig {
        width: 16,
        height: 10,
        oversampling: 2,
        iterations: 100,
        ..four_by_four()
    };
    let image = render(&config).unwrap();
    image.save(&path).unwrap();
    assert!(path.exists());
    assert!(std::fs::metadata(&path).unwrap().len() >= 16 * 10 * 3);
}
