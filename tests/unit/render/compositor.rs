use std::{path::PathBuf, sync::Arc};

use super::*;
use crate::{
    assets::{decode::PortraitImage, resolve::ResolvedPerson},
    gallery::model::{Person, SortKey},
    layout::placement::CellPosition,
    render::caption::CaptionStyle,
};

fn small_params() -> LayoutParams {
    LayoutParams {
        grid_width: 3,
        grid_height: 2,
        cell_width_px: 20,
        cell_height_px: 30,
        margin_x_px: 4,
        margin_y_px: 6,
        caption_height_px: 10,
    }
}

fn compositor(params: LayoutParams) -> PageCompositor {
    let captions = CaptionRenderer::new(CaptionStyle::default(), None).unwrap();
    PageCompositor::new(params, captions).unwrap()
}

fn people(n: usize) -> Vec<Person> {
    (0..n)
        .map(|i| Person {
            given_names: format!("G{i}"),
            family_name: format!("F{i}"),
            sort_key: SortKey::from(i as i64),
            date_of_entry: "2020".to_string(),
            portrait: PathBuf::from(format!("{i}.png")),
        })
        .collect()
}

fn solid(rgb: [u8; 3], w: u32, h: u32) -> PortraitImage {
    PortraitImage {
        pixels: Arc::new(image::RgbImage::from_pixel(w, h, image::Rgb(rgb))),
    }
}

fn color_for(i: usize) -> [u8; 3] {
    [(i * 40) as u8, 255 - (i * 30) as u8, 100]
}

fn resolved(persons: &[Person]) -> ResolvedPage<'_> {
    ResolvedPage {
        index: 0,
        members: persons
            .iter()
            .enumerate()
            .map(|(i, person)| ResolvedPerson {
                person,
                image: solid(color_for(i), 7 + i as u32, 9 + 2 * i as u32),
                used_fallback: false,
            })
            .collect(),
    }
}

fn close(a: [u8; 3], b: [u8; 3]) -> bool {
    a.iter().zip(b).all(|(&x, y)| x.abs_diff(y) <= 1)
}

#[test]
fn canvas_has_computed_size_and_white_margins() {
    let p = small_params();
    let persons = people(2);
    let canvas = compositor(p).composite(&resolved(&persons)).unwrap();
    assert_eq!((canvas.width(), canvas.height()), canvas_size(&p));
    assert_eq!(canvas.pixels.get_pixel(0, 0).0, [255, 255, 255]);
    let (w, h) = canvas_size(&p);
    assert_eq!(canvas.pixels.get_pixel(w - 1, h - 1).0, [255, 255, 255]);
}

#[test]
fn thumbnails_fill_their_cells_row_major() {
    let p = small_params();
    let persons = people(5);
    let canvas = compositor(p).composite(&resolved(&persons)).unwrap();

    for i in 0..5 {
        let cell = place(&p, CellPosition::from_slot(i, p.grid_width));
        let rect = cell.thumb_rect(&p);
        for (x, y) in [
            (rect.origin.x, rect.origin.y),
            (rect.right() - 1, rect.bottom() - 1),
            (rect.origin.x + 10, rect.origin.y + 15),
        ] {
            let got = canvas.pixels.get_pixel(x, y).0;
            assert!(close(got, color_for(i)), "cell {i} at ({x},{y}): {got:?}");
        }
    }
}

#[test]
fn caption_blocks_sit_below_thumbnails() {
    let p = small_params();
    let persons = people(1);
    let canvas = compositor(p).composite(&resolved(&persons)).unwrap();
    let caption = place(&p, CellPosition { column: 0, row: 0 }).caption_rect(&p);
    for y in caption.origin.y..caption.bottom() {
        for x in caption.origin.x..caption.right() {
            assert_eq!(canvas.pixels.get_pixel(x, y).0, [200, 200, 200]);
        }
    }
}

#[test]
fn unused_cells_stay_background() {
    let p = small_params();
    let persons = people(4);
    let canvas = compositor(p).composite(&resolved(&persons)).unwrap();
    let empty = place(&p, CellPosition { column: 2, row: 1 }).cell_rect(&p);
    assert_eq!(
        canvas.pixels.get_pixel(empty.origin.x + 1, empty.origin.y + 1).0,
        [255, 255, 255]
    );
}

#[test]
fn compositing_is_deterministic() {
    let p = small_params();
    let persons = people(6);
    let mut c = compositor(p);
    let a = c.composite(&resolved(&persons)).unwrap();
    let b = c.composite(&resolved(&persons)).unwrap();
    assert_eq!(a.pixels.as_raw(), b.pixels.as_raw());
}

#[test]
fn empty_page_is_rejected() {
    let page = ResolvedPage {
        index: 2,
        members: vec![],
    };
    let err = compositor(small_params()).composite(&page).unwrap_err();
    assert!(matches!(err, GalleryError::EmptyInput(_)));
}

#[test]
fn overfull_page_is_rejected() {
    let persons = people(7);
    let err = compositor(small_params())
        .composite(&resolved(&persons))
        .unwrap_err();
    assert!(matches!(err, GalleryError::Config(_)));
}

#[test]
fn invalid_params_are_rejected_up_front() {
    let captions = CaptionRenderer::new(CaptionStyle::default(), None).unwrap();
    let params = LayoutParams {
        cell_width_px: 0,
        ..small_params()
    };
    assert!(PageCompositor::new(params, captions).is_err());
}
