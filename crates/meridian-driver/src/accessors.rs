use meridian_types::{Coordinate, GridPoint};

use crate::config::DEFAULT_COLOR;

/// An instance color. Alpha is optional and resolves to opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub rgb: [u8; 3],
    pub alpha: Option<u8>,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            rgb: [r, g, b],
            alpha: None,
        }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            rgb: [r, g, b],
            alpha: Some(a),
        }
    }

    #[must_use]
    pub const fn to_rgba(self) -> [u8; 4] {
        let [r, g, b] = self.rgb;
        let a = match self.alpha {
            Some(a) => a,
            None => 255,
        };
        [r, g, b, a]
    }
}

impl Default for Color {
    fn default() -> Self {
        let [r, g, b, a] = DEFAULT_COLOR;
        Self::rgba(r, g, b, a)
    }
}

type Accessor<E, T> = Box<dyn Fn(&E) -> T + Send + Sync>;

/// How to read instance attributes out of an entity type `E`.
///
/// ```text
/// ┌───────────┬──────────┬────────────────────────────────────────────┐
/// │ Accessor  │ Default  │ Used for                                   │
/// ├───────────┼──────────┼────────────────────────────────────────────┤
/// │ position  │ required │ instance centroid, 2 floats                │
/// │ elevation │ 0        │ instance height, 1 float                   │
/// │ color     │ dark red │ 4 bytes, alpha 255 when unset              │
/// │ vertices  │ none     │ boundary ring of the orientation reference │
/// └───────────┴──────────┴────────────────────────────────────────────┘
/// ```
///
/// Color channels are bytes already, so the builder never clamps.
pub struct InstanceAccessors<E> {
    position: Accessor<E, Coordinate>,
    elevation: Accessor<E, f64>,
    color: Accessor<E, Color>,
    vertices: Accessor<E, Vec<Coordinate>>,
}

impl<E> InstanceAccessors<E> {
    pub fn new(position: impl Fn(&E) -> Coordinate + Send + Sync + 'static) -> Self {
        Self {
            position: Box::new(position),
            elevation: Box::new(|_: &E| 0.0),
            color: Box::new(|_: &E| Color::default()),
            vertices: Box::new(|_: &E| Vec::new()),
        }
    }

    #[must_use]
    pub fn with_elevation(mut self, elevation: impl Fn(&E) -> f64 + Send + Sync + 'static) -> Self {
        self.elevation = Box::new(elevation);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Fn(&E) -> Color + Send + Sync + 'static) -> Self {
        self.color = Box::new(color);
        self
    }

    #[must_use]
    pub fn with_vertices(
        mut self,
        vertices: impl Fn(&E) -> Vec<Coordinate> + Send + Sync + 'static,
    ) -> Self {
        self.vertices = Box::new(vertices);
        self
    }

    pub fn position(&self, entity: &E) -> Coordinate {
        (self.position)(entity)
    }

    pub fn elevation(&self, entity: &E) -> f64 {
        (self.elevation)(entity)
    }

    pub fn color(&self, entity: &E) -> Color {
        (self.color)(entity)
    }

    pub fn vertices(&self, entity: &E) -> Vec<Coordinate> {
        (self.vertices)(entity)
    }
}

impl InstanceAccessors<GridPoint> {
    /// Accessors for decoded grid samples: the sample is the centroid,
    /// everything else is default.
    #[must_use]
    pub fn grid_points() -> Self {
        Self::new(|point: &GridPoint| point.position)
    }
}
