//! SVG export.

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use molviz_core::{
    color::Color,
    draw::Scene,
    geometry::{Bounds, Insets},
};

use crate::{error::MolvizError, export::Exporter};

/// Space kept around the scene content.
pub const DEFAULT_PADDING: f32 = 20.0;

/// Builds SVG documents from scenes.
#[derive(Debug, Clone)]
pub struct SvgBuilder {
    background: Option<Color>,
    anti_aliasing: bool,
    padding: f32,
}

impl Default for SvgBuilder {
    fn default() -> Self {
        Self {
            background: None,
            anti_aliasing: true,
            padding: DEFAULT_PADDING,
        }
    }
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    pub fn with_anti_aliasing(mut self, enabled: bool) -> Self {
        self.anti_aliasing = enabled;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// The region shown by the document: scene bounds plus padding. An
    /// empty scene shows only the padding around the origin.
    pub fn view_box(&self, scene: &Scene) -> Bounds {
        scene
            .bounds()
            .unwrap_or_default()
            .add_padding(Insets::uniform(self.padding))
    }

    pub fn build(&self, scene: &Scene) -> Document {
        let view_box = self.view_box(scene);
        debug!(
            width = view_box.width(),
            height = view_box.height(),
            primitives = scene.len();
            "Building SVG document"
        );

        let shape_rendering = if self.anti_aliasing {
            "geometricPrecision"
        } else {
            "crispEdges"
        };
        let mut doc = Document::new()
            .set(
                "viewBox",
                (
                    view_box.min_x(),
                    view_box.min_y(),
                    view_box.width(),
                    view_box.height(),
                ),
            )
            .set("width", view_box.width())
            .set("height", view_box.height())
            .set("shape-rendering", shape_rendering);

        if let Some(background) = self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", view_box.min_x())
                    .set("y", view_box.min_y())
                    .set("width", view_box.width())
                    .set("height", view_box.height())
                    .set("fill", background.to_hex())
                    .set("fill-opacity", background.alpha()),
            );
        }

        for node in scene.to_svg_nodes() {
            doc = doc.add(node);
        }
        doc
    }
}

/// Renders `scene` to an SVG string.
pub fn render_document(scene: &Scene, background: Option<Color>, anti_aliasing: bool) -> String {
    SvgBuilder::new()
        .with_background(background)
        .with_anti_aliasing(anti_aliasing)
        .build(scene)
        .to_string()
}

/// Writes scenes to an SVG file.
#[derive(Debug, Clone)]
pub struct Svg {
    path: PathBuf,
    builder: SvgBuilder,
}

impl Svg {
    pub fn new(path: impl Into<PathBuf>, builder: SvgBuilder) -> Self {
        Self {
            path: path.into(),
            builder,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_document(&self, doc: &Document) -> Result<(), MolvizError> {
        info!(path:? = self.path; "Creating SVG file");
        let mut file = File::create(&self.path).map_err(|err| {
            error!(path:? = self.path, err:%; "Failed to create SVG file");
            err
        })?;
        write!(file, "{doc}").map_err(|err| {
            error!(path:? = self.path, err:%; "Failed to write SVG content");
            err
        })?;
        Ok(())
    }
}

impl Exporter for Svg {
    fn export_scene(&mut self, scene: &Scene) -> Result<(), MolvizError> {
        let doc = self.builder.build(scene);
        self.write_document(&doc)
    }
}
