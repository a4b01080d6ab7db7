//! Atlas render tasks.
//!
//! An atlas task is added to the graph and left open. Later tasks reserve
//! rectangles in it for the paths they want rasterized; the task turns the
//! reservations into draws when it is closed.

use crate::types::IRect;

#[derive(Debug, Clone, Copy)]
struct Shelf {
    top: u16,
    height: u16,
    cursor: u16,
}

/// Shelf-packed path atlas.
#[derive(Debug)]
pub struct AtlasTask {
    width: u16,
    height: u16,
    shelves: Vec<Shelf>,
    path_count: usize,
    used_bounds: Option<IRect>,
}

impl AtlasTask {
    /// Create an empty atlas of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            shelves: Vec::new(),
            path_count: 0,
            used_bounds: None,
        }
    }

    /// Atlas width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Atlas height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of paths packed so far.
    pub fn path_count(&self) -> usize {
        self.path_count
    }

    /// Reserve a `width` x `height` rectangle. Returns its top-left corner, or
    /// `None` if the atlas is full.
    pub(crate) fn add_path(&mut self, width: u16, height: u16) -> Option<(u16, u16)> {
        if width == 0 || height == 0 || width > self.width || height > self.height {
            return None;
        }

        // Tightest existing shelf with room on the right.
        let atlas_width = self.width;
        let fitting = self
            .shelves
            .iter_mut()
            .filter(|shelf| shelf.height >= height && atlas_width - shelf.cursor >= width)
            .min_by_key(|shelf| shelf.height);

        let location = if let Some(shelf) = fitting {
            let location = (shelf.cursor, shelf.top);
            shelf.cursor += width;
            location
        } else {
            let top = self
                .shelves
                .last()
                .map_or(0, |shelf| shelf.top + shelf.height);
            if self.height - top < height {
                return None;
            }
            self.shelves.push(Shelf {
                top,
                height,
                cursor: width,
            });
            (0, top)
        };

        let rect = IRect::from_xywh(
            location.0 as i32,
            location.1 as i32,
            width as i32,
            height as i32,
        );
        self.used_bounds = Some(match self.used_bounds {
            Some(bounds) => bounds.union(&rect),
            None => rect,
        });
        self.path_count += 1;
        Some(location)
    }

    pub(crate) fn on_make_closed(&mut self) -> Option<IRect> {
        if self.path_count > 0 {
            log::debug!(
                "Atlas {}x{} closing with {} paths",
                self.width,
                self.height,
                self.path_count
            );
        }
        self.used_bounds
    }
}
