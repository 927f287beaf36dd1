use std::collections::VecDeque;
use std::rc::Rc;

use crate::config::{BoardConfig, RotateTarget, is_positive};
use crate::error::{ConfigError, LoadError, PluginError, RenderError, ShapeError};
use crate::events::{BoardEvent, EventBus, EventKind, PointerInfo, Subscription, WheelInfo};
use crate::geometry::Point;
use crate::hit;
use crate::hover::HoverTransition;
use crate::image::{self, ImageAnchor, ImageLoader, LoadedImage};
use crate::input::{Button, DragState, Key, Modifiers, WheelDelta};
use crate::overlay::Overlay;
use crate::plugin::{Plugin, PluginRegistry};
use crate::plugins::{CanvasDrag, CanvasRotate, WheelZoom};
use crate::render::{self, Painter};
use crate::scene::{EntityRef, Scene, Shape, ShapeId};
use crate::shapes::{PointOptions, PolygonOptions, RectangleOptions, ShapeManager, StyleOptions};
use crate::viewport::Viewport;

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

/// Actions returned from input handlers for the host to process.
///
/// A handler returns at most one [`Action::RenderNeeded`], always last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetCursor(String),
    RenderNeeded,
}

const CURSOR_MOVE: &str = "move";
const CURSOR_DEFAULT: &str = "default";

/// Core board state: everything except the plugins.
///
/// Separated from [`Board`] so plugins can be handed a mutable view of the
/// board while the registry that owns them is borrowed.
pub struct BoardCore {
    config: BoardConfig,
    viewport: Viewport,
    shapes: ShapeManager,
    image: Option<ImageAnchor>,
    loader: Option<Rc<dyn ImageLoader>>,
    /// Cumulative rotation in `[0, 360)`.
    angle: f64,
    overlay: Option<Overlay>,
    bus: EventBus,
    /// Events raised but not yet delivered to plugins and listeners.
    pending: VecDeque<BoardEvent>,
    drag: DragState,
    cursor: String,
    cursor_changed: bool,
    needs_render: bool,
}

impl BoardCore {
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self {
            viewport: Viewport::new(config.width, config.height),
            shapes: ShapeManager::new(&config),
            config,
            image: None,
            loader: None,
            angle: 0.0,
            overlay: None,
            bus: EventBus::new(),
            pending: VecDeque::new(),
            drag: DragState::Idle,
            cursor: CURSOR_DEFAULT.into(),
            cursor_changed: false,
            needs_render: false,
        }
    }

    fn emit(&mut self, event: BoardEvent) {
        self.pending.push_back(event);
    }

    fn set_cursor(&mut self, cursor: &str) {
        if self.cursor != cursor {
            self.cursor = cursor.to_string();
            self.cursor_changed = true;
        }
    }

    /// Drain the cursor change and render request raised since the last call.
    pub fn take_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if std::mem::take(&mut self.cursor_changed) {
            actions.push(Action::SetCursor(self.cursor.clone()));
        }
        if std::mem::take(&mut self.needs_render) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    #[must_use]
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    // --- Viewport ---

    /// `None` resets the viewport to identity, which also zeroes the angle
    /// when rotation targets the viewport. A scale alone zooms about the
    /// canvas center; with `point` it zooms about that screen point.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidZoom`] for a non-positive scale; the
    /// viewport is left untouched.
    pub fn zoom(&mut self, scale: Option<f64>, point: Option<Point>) -> Result<(), ConfigError> {
        match scale {
            None => {
                self.viewport.reset();
                if self.config.rotate.target == RotateTarget::Viewport {
                    self.angle = 0.0;
                }
                self.zoom_changed();
                Ok(())
            }
            Some(level) => {
                let at = point.unwrap_or_else(|| self.viewport.center());
                self.zoom_to_point(at, level)
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidZoom`] for a non-positive level.
    pub fn zoom_to_point(&mut self, screen: Point, level: f64) -> Result<(), ConfigError> {
        if !is_positive(level) {
            tracing::warn!(zoom = level, "rejecting zoom level");
            return Err(ConfigError::InvalidZoom(level));
        }
        self.viewport.zoom_to_point(screen, level);
        self.zoom_changed();
        Ok(())
    }

    fn zoom_changed(&mut self) {
        let zoom = self.viewport.zoom;
        self.shapes.apply_zoom(zoom);
        tracing::debug!(zoom, "zoom changed");
        self.emit(BoardEvent::Zoom(zoom));
        self.needs_render = true;
    }

    #[must_use]
    pub fn zoom_level(&self) -> f64 {
        self.viewport.zoom
    }

    pub fn relative_pan(&mut self, dx: f64, dy: f64) {
        self.viewport.relative_pan(dx, dy);
        self.needs_render = true;
    }

    /// Add `delta` degrees to the cumulative angle and apply it to the
    /// configured rotation target. Returns the normalized angle.
    pub fn rotate(&mut self, delta: f64) -> f64 {
        self.angle = image::normalize_angle(self.angle + delta);
        match self.config.rotate.target {
            RotateTarget::Image => {
                let (w, h) = (self.viewport.width, self.viewport.height);
                if let Some(anchor) = &mut self.image {
                    anchor.refit(w, h, self.angle);
                }
            }
            RotateTarget::Viewport => self.viewport.rotation_deg = self.angle,
        }
        tracing::debug!(angle = self.angle, "rotated");
        self.emit(BoardEvent::Rotate(self.angle));
        self.needs_render = true;
        self.angle
    }

    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Resize the canvas. The image is re-fit and the overlay follows.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSize`] for a non-positive size.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), ConfigError> {
        if !(is_positive(width) && is_positive(height)) {
            tracing::warn!(width, height, "rejecting canvas size");
            return Err(ConfigError::InvalidSize { width, height });
        }
        self.viewport.resize(width, height);
        if let Some(anchor) = &mut self.image {
            anchor.refit(width, height, self.angle);
        }
        if let Some(overlay) = &mut self.overlay {
            overlay.resize(width, height);
        }
        self.needs_render = true;
        Ok(())
    }

    // --- Coordinates ---

    #[must_use]
    pub fn screen_to_scene(&self, screen: Point) -> Point {
        self.viewport.screen_to_scene(screen)
    }

    /// Identity when no image is loaded.
    #[must_use]
    pub fn scene_to_image(&self, scene: Point) -> Point {
        image::scene_to_image(self.image.as_ref(), scene)
    }

    #[must_use]
    pub fn image_to_scene(&self, image: Point) -> Point {
        image::image_to_scene(self.image.as_ref(), image)
    }

    // --- Image ---

    pub fn set_image_loader(&mut self, loader: Rc<dyn ImageLoader>) {
        self.loader = Some(loader);
    }

    /// Fetch `url` and place it as the background image.
    ///
    /// # Errors
    ///
    /// Returns the loader's [`LoadError`], or [`LoadError::LoaderUnavailable`]
    /// when none is set. The failure is also emitted as
    /// [`BoardEvent::ImageLoadError`].
    pub async fn load(&mut self, url: &str) -> Result<(), LoadError> {
        let result = match self.loader.clone() {
            Some(loader) => loader.fetch(url).await,
            None => Err(LoadError::LoaderUnavailable),
        };
        match result.and_then(|loaded| self.place_image(loaded)) {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(url, %err, "image load failed");
                self.emit(BoardEvent::ImageLoadError(err.clone()));
                Err(err)
            }
        }
    }

    /// Replace the background with an already decoded image, fit to the
    /// canvas at the current angle.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidDimensions`] for an image with no pixels.
    pub fn place_image(&mut self, loaded: LoadedImage) -> Result<(), LoadError> {
        if !(is_positive(loaded.width) && is_positive(loaded.height)) {
            return Err(LoadError::InvalidDimensions { url: loaded.url });
        }
        self.remove_image();
        let anchor = ImageAnchor::fit(&loaded, self.viewport.width, self.viewport.height, self.angle);
        tracing::info!(url = %loaded.url, width = loaded.width, height = loaded.height, "image loaded");
        self.emit(BoardEvent::Load { url: loaded.url, width: loaded.width, height: loaded.height });
        self.image = Some(anchor);
        self.needs_render = true;
        Ok(())
    }

    /// Take the background image off the board. Returns whether there was one.
    pub fn remove_image(&mut self) -> bool {
        let Some(anchor) = self.image.take() else {
            return false;
        };
        self.emit(BoardEvent::ImageRemoved { url: anchor.url });
        self.needs_render = true;
        true
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageAnchor> {
        self.image.as_ref()
    }

    // --- Overlay ---

    pub fn set_overlay(&mut self, overlay: Overlay) {
        self.overlay = Some(overlay);
    }

    pub fn overlay_mut(&mut self) -> Option<&mut Overlay> {
        self.overlay.as_mut()
    }

    /// Detach the overlay, clearing it first.
    pub fn take_overlay(&mut self) -> Option<Overlay> {
        let mut overlay = self.overlay.take()?;
        if let Err(err) = overlay.clear() {
            tracing::warn!(%err, "failed to clear overlay");
        }
        Some(overlay)
    }

    // --- Listeners ---

    pub fn subscribe(&mut self, kind: EventKind, listener: impl FnMut(&BoardEvent) + 'static) -> Subscription {
        self.bus.subscribe(kind, listener)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.bus.unsubscribe(subscription)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.bus.len()
    }

    // --- Shapes ---

    pub fn add_rectangle(&mut self, options: &RectangleOptions) -> ShapeId {
        let id = self.shapes.add_rectangle(options, self.viewport.zoom);
        self.shape_added(id)
    }

    /// # Errors
    ///
    /// Returns [`ShapeError::CornerCount`] unless exactly four corners are given.
    pub fn add_rectangle_from_corners(
        &mut self,
        corners: &[Point],
        style: &StyleOptions,
    ) -> Result<ShapeId, ShapeError> {
        let id = self.shapes.add_rectangle_from_corners(corners, style, self.viewport.zoom)?;
        Ok(self.shape_added(id))
    }

    /// # Errors
    ///
    /// Returns [`ShapeError::EmptyPolygon`] when there are no points.
    pub fn add_polygon(&mut self, options: &PolygonOptions) -> Result<ShapeId, ShapeError> {
        let id = self.shapes.add_polygon(options, self.viewport.zoom)?;
        Ok(self.shape_added(id))
    }

    pub fn add_point(&mut self, options: &PointOptions) -> ShapeId {
        let id = self.shapes.add_point(options, self.viewport.zoom);
        self.shape_added(id)
    }

    fn shape_added(&mut self, id: ShapeId) -> ShapeId {
        self.emit(BoardEvent::ShapeAdded(id));
        self.needs_render = true;
        id
    }

    /// # Errors
    ///
    /// Returns [`ShapeError::NotFound`] for an unknown id.
    pub fn remove_shape(&mut self, id: &ShapeId) -> Result<(), ShapeError> {
        let was_selected = self.shapes.selected() == Some(*id);
        if self.drag.shape_id() == Some(*id) {
            self.drag = DragState::Idle;
        }
        self.shapes.remove_shape(id)?;
        if was_selected {
            self.emit(BoardEvent::SelectionChanged(None));
        }
        self.emit(BoardEvent::ShapeRemoved(*id));
        self.needs_render = true;
        Ok(())
    }

    pub fn remove_all_shapes(&mut self) -> Vec<ShapeId> {
        let had_selection = self.shapes.selected().is_some();
        self.drag = DragState::Idle;
        let removed = self.shapes.remove_all_shapes();
        if had_selection {
            self.emit(BoardEvent::SelectionChanged(None));
        }
        for id in &removed {
            self.emit(BoardEvent::ShapeRemoved(*id));
        }
        if !removed.is_empty() {
            self.needs_render = true;
        }
        removed
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGrid`] for a non-positive grid.
    pub fn set_coordinate_grid(&mut self, step: f64) -> Result<(), ConfigError> {
        self.shapes.set_coordinate_grid(step)
    }

    #[must_use]
    pub fn coordinate_grid(&self) -> f64 {
        self.shapes.coordinate_grid()
    }

    pub fn set_all_interactivity(&mut self, interactive: bool) {
        let had_selection = self.shapes.selected().is_some();
        self.shapes.set_all_interactivity(interactive);
        if had_selection && self.shapes.selected().is_none() {
            self.emit(BoardEvent::SelectionChanged(None));
        }
        self.needs_render = true;
    }

    pub fn toggle_all_interactivity(&mut self) -> bool {
        let next = !self.shapes.interactivity_state();
        self.set_all_interactivity(next);
        next
    }

    #[must_use]
    pub fn interactivity_state(&self) -> bool {
        self.shapes.interactivity_state()
    }

    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.shape(id)
    }

    #[must_use]
    pub fn shape_ids(&self) -> &[ShapeId] {
        self.shapes.shape_ids()
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        self.shapes.scene()
    }

    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.shapes.selected()
    }

    #[must_use]
    pub fn compensation_count(&self) -> usize {
        self.shapes.compensation_count()
    }

    // --- Render ---

    /// Draw the board and clear the pending render request.
    ///
    /// # Errors
    ///
    /// Returns the painter's first error.
    pub fn render(&mut self, painter: &mut dyn Painter) -> Result<(), RenderError> {
        render::draw_scene(painter, &self.viewport, self.image.as_ref(), self.shapes.scene())?;
        self.needs_render = false;
        Ok(())
    }

    // --- Input ---

    fn pointer_info(&self, screen: Point, button: Option<Button>, modifiers: Modifiers) -> PointerInfo {
        let scene = self.viewport.screen_to_scene(screen);
        let target = hit::hit_test(self.shapes.scene(), scene, self.viewport.zoom);
        PointerInfo { screen, scene, button, modifiers, target }
    }

    /// Primary-button press selects what is under the pointer and starts a
    /// shape or vertex drag. Other buttons are left to plugins.
    pub fn pointer_down(&mut self, screen: Point, button: Option<Button>, modifiers: Modifiers) {
        let info = self.pointer_info(screen, button, modifiers);
        self.emit(BoardEvent::PointerDown(info));
        if button != Some(Button::Primary) {
            return;
        }
        let owner = info.target.and_then(|t| self.shapes.scene().owner_of(t));
        if self.shapes.select(owner) {
            self.emit(BoardEvent::SelectionChanged(self.shapes.selected()));
            self.needs_render = true;
        }
        self.drag = info.target.map(|t| self.shapes.begin_drag(t, info.scene)).unwrap_or_default();
    }

    pub fn pointer_move(&mut self, screen: Point, modifiers: Modifiers) {
        let info = self.pointer_info(screen, None, modifiers);
        self.emit(BoardEvent::PointerMove(info));

        if !self.drag.is_idle() {
            let mut drag = self.drag;
            let modified = self.shapes.drag_to(&mut drag, info.scene, modifiers);
            self.drag = drag;
            for id in modified {
                self.emit(BoardEvent::ShapeModified(id));
            }
            self.needs_render = true;
            return;
        }

        let transitions = self.shapes.hover(info.target);
        for transition in &transitions {
            match *transition {
                HoverTransition::Out(e) => self.emit(BoardEvent::PointerOut(e)),
                HoverTransition::Over(e) => self.emit(BoardEvent::PointerOver(e)),
            }
        }
        if !transitions.is_empty() {
            self.needs_render = true;
        }
        self.set_cursor(if info.target.is_some() { CURSOR_MOVE } else { CURSOR_DEFAULT });
    }

    pub fn pointer_up(&mut self, screen: Point, button: Option<Button>, modifiers: Modifiers) {
        let info = self.pointer_info(screen, button, modifiers);
        self.emit(BoardEvent::PointerUp(info));
        let drag = std::mem::take(&mut self.drag);
        if drag.is_idle() {
            return;
        }
        if let Some(id) = self.shapes.end_drag(drag) {
            self.emit(BoardEvent::ShapeModified(id));
        }
        self.needs_render = true;
    }

    pub fn wheel(&mut self, screen: Point, delta: WheelDelta, modifiers: Modifiers) {
        let scene = self.viewport.screen_to_scene(screen);
        self.emit(BoardEvent::Wheel(WheelInfo { screen, scene, delta, modifiers }));
    }

    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) {
        self.emit(BoardEvent::KeyDown { key, modifiers });
    }

    /// Whether a shape or vertex drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        !self.drag.is_idle()
    }

    /// Whether the pointer is currently over `entity`.
    #[must_use]
    pub fn is_hovered(&self, entity: EntityRef) -> bool {
        self.shapes.is_hovered(entity)
    }
}

/// The board: [`BoardCore`] plus its plugins.
///
/// Every entry point applies its change to the core, then delivers the
/// events it raised to plugins (in registration order) and after that to
/// host listeners. Events a plugin raises are queued behind the current one.
pub struct Board {
    pub core: BoardCore,
    plugins: PluginRegistry,
    destroyed: bool,
}

impl Board {
    /// Validate `config` and build a board, registering the built-in plugins
    /// unless `default_plugins` is off.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] from validation.
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let defaults: Vec<Box<dyn Plugin>> = if config.default_plugins {
            vec![
                Box::new(WheelZoom::new(config.wheel)),
                Box::new(CanvasDrag::new()),
                Box::new(CanvasRotate::new(&config.rotate)),
            ]
        } else {
            Vec::new()
        };
        let mut board = Self { core: BoardCore::new(config), plugins: PluginRegistry::new(), destroyed: false };
        for plugin in defaults {
            let name = plugin.name();
            if let Err(err) = board.use_plugin(plugin) {
                tracing::warn!(plugin = name, %err, "built-in plugin disabled");
            }
        }
        Ok(board)
    }

    /// Register a plugin. A plugin already registered under the same name is
    /// destroyed and replaced.
    ///
    /// # Errors
    ///
    /// Propagates the plugin's init failure.
    pub fn use_plugin(&mut self, plugin: Box<dyn Plugin>) -> Result<(), PluginError> {
        self.plugins.register(&mut self.core, plugin)?;
        self.flush_events();
        Ok(())
    }

    /// Destroy and drop the plugin called `name`.
    pub fn remove_plugin(&mut self, name: &str) -> bool {
        let removed = self.plugins.remove(&mut self.core, name);
        self.flush_events();
        removed
    }

    #[must_use]
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.names()
    }

    /// Deliver queued events: plugins first, then host listeners.
    fn flush_events(&mut self) {
        while let Some(event) = self.core.pending.pop_front() {
            self.plugins.dispatch(&mut self.core, &event);
            self.core.bus.emit(&event);
        }
    }

    fn finish(&mut self) -> Vec<Action> {
        self.flush_events();
        self.core.take_actions()
    }

    /// Pending cursor change and render request from API calls made outside
    /// the input handlers.
    pub fn take_actions(&mut self) -> Vec<Action> {
        self.core.take_actions()
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Option<Button>, modifiers: Modifiers) -> Vec<Action> {
        if self.destroyed {
            return Vec::new();
        }
        self.core.pointer_down(screen, button, modifiers);
        self.finish()
    }

    pub fn on_pointer_move(&mut self, screen: Point, modifiers: Modifiers) -> Vec<Action> {
        if self.destroyed {
            return Vec::new();
        }
        self.core.pointer_move(screen, modifiers);
        self.finish()
    }

    pub fn on_pointer_up(&mut self, screen: Point, button: Option<Button>, modifiers: Modifiers) -> Vec<Action> {
        if self.destroyed {
            return Vec::new();
        }
        self.core.pointer_up(screen, button, modifiers);
        self.finish()
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if self.destroyed {
            return Vec::new();
        }
        self.core.wheel(screen, delta, modifiers);
        self.finish()
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if self.destroyed {
            return Vec::new();
        }
        self.core.key_down(key, modifiers);
        self.finish()
    }

    // --- Host API ---

    /// True, with a debug log, once the board is destroyed. Host calls
    /// after that point change nothing.
    fn rejects(&self, op: &'static str) -> bool {
        if self.destroyed {
            tracing::debug!(op, "ignoring call on destroyed board");
        }
        self.destroyed
    }

    /// See [`BoardCore::zoom`]. A no-op on a destroyed board.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidZoom`] for a non-positive scale.
    pub fn zoom(&mut self, scale: Option<f64>, point: Option<Point>) -> Result<(), ConfigError> {
        if self.rejects("zoom") {
            return Ok(());
        }
        let result = self.core.zoom(scale, point);
        self.flush_events();
        result
    }

    /// Returns the new angle, or the unchanged one on a destroyed board.
    pub fn rotate(&mut self, delta: f64) -> f64 {
        if self.rejects("rotate") {
            return self.core.angle();
        }
        let angle = self.core.rotate(delta);
        self.flush_events();
        angle
    }

    /// Load and place a background image. Only one image is ever on the
    /// board; the previous one is removed first.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] from fetching or decoding, or
    /// [`LoadError::Destroyed`] once the board is destroyed.
    pub async fn load(&mut self, url: &str) -> Result<(), LoadError> {
        if self.rejects("load") {
            return Err(LoadError::Destroyed);
        }
        let result = self.core.load(url).await;
        self.flush_events();
        result
    }

    pub fn remove_image(&mut self) -> bool {
        if self.rejects("remove_image") {
            return false;
        }
        let removed = self.core.remove_image();
        self.flush_events();
        removed
    }

    /// # Errors
    ///
    /// Returns [`ShapeError::Destroyed`] once the board is destroyed.
    pub fn add_rectangle(&mut self, options: &RectangleOptions) -> Result<ShapeId, ShapeError> {
        if self.rejects("add_rectangle") {
            return Err(ShapeError::Destroyed);
        }
        let id = self.core.add_rectangle(options);
        self.flush_events();
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`ShapeError::CornerCount`] unless exactly four corners are given.
    pub fn add_rectangle_from_corners(
        &mut self,
        corners: &[Point],
        style: &StyleOptions,
    ) -> Result<ShapeId, ShapeError> {
        if self.rejects("add_rectangle_from_corners") {
            return Err(ShapeError::Destroyed);
        }
        let result = self.core.add_rectangle_from_corners(corners, style);
        self.flush_events();
        result
    }

    /// # Errors
    ///
    /// Returns [`ShapeError::EmptyPolygon`] when there are no points.
    pub fn add_polygon(&mut self, options: &PolygonOptions) -> Result<ShapeId, ShapeError> {
        if self.rejects("add_polygon") {
            return Err(ShapeError::Destroyed);
        }
        let result = self.core.add_polygon(options);
        self.flush_events();
        result
    }

    /// # Errors
    ///
    /// Returns [`ShapeError::Destroyed`] once the board is destroyed.
    pub fn add_point(&mut self, options: &PointOptions) -> Result<ShapeId, ShapeError> {
        if self.rejects("add_point") {
            return Err(ShapeError::Destroyed);
        }
        let id = self.core.add_point(options);
        self.flush_events();
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`ShapeError::NotFound`] for an unknown id.
    pub fn remove_shape(&mut self, id: &ShapeId) -> Result<(), ShapeError> {
        if self.rejects("remove_shape") {
            return Err(ShapeError::Destroyed);
        }
        let result = self.core.remove_shape(id);
        self.flush_events();
        result
    }

    pub fn remove_all_shapes(&mut self) -> Vec<ShapeId> {
        if self.rejects("remove_all_shapes") {
            return Vec::new();
        }
        let removed = self.core.remove_all_shapes();
        self.flush_events();
        removed
    }

    /// Emit `Destroy`, destroy plugins last-registered first, clear shapes,
    /// image and overlay, then drop host listeners. Further input is ignored.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.core.emit(BoardEvent::Destroy);
        self.flush_events();
        self.plugins.destroy_all(&mut self.core);
        self.core.remove_all_shapes();
        self.core.remove_image();
        self.flush_events();
        self.core.take_overlay();
        self.core.bus.clear();
        self.destroyed = true;
        tracing::debug!("board destroyed");
    }
}
