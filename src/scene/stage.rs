use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::BoutonResult;
use crate::text::engine::TextEngine;
use crate::widget::button::Button;

/// Handle to a node attached to a [`Stage`].
///
/// The handle doubles as the node's resize subscription: while it is
/// attached the node is re-laid out on every viewport change, and
/// [`Stage::detach`] releases both the node and the subscription. Nothing
/// accumulates across attach/detach cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

/// Rendering-surface host for buttons.
///
/// Owns the viewport, the text engine (register fonts through
/// [`Stage::text_engine_mut`] before attaching labeled buttons), and the
/// attached nodes. All operations are synchronous and run on the caller's
/// thread; the host is expected to feed viewport sizes and pointer taps from
/// whatever event source it has.
pub struct Stage {
    pub(crate) viewport: Viewport,
    pub(crate) text: TextEngine,
    pub(crate) nodes: Vec<(NodeId, Button)>,
    next_id: u64,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("viewport", &self.viewport)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

impl Stage {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            text: TextEngine::new(),
            nodes: Vec::new(),
            next_id: 0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn text_engine(&self) -> &TextEngine {
        &self.text
    }

    pub fn text_engine_mut(&mut self) -> &mut TextEngine {
        &mut self.text
    }

    /// Attach a button; it is laid out against the current viewport
    /// immediately and subscribed to subsequent viewport changes.
    pub fn attach(&mut self, mut button: Button) -> BoutonResult<NodeId> {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        button.layout(self.viewport, &mut self.text)?;
        self.nodes.push((id, button));
        tracing::debug!(id = id.0, "attached node");
        Ok(id)
    }

    /// Detach a node, dropping its resize subscription. Returns the button
    /// so the host can re-attach it elsewhere.
    pub fn detach(&mut self, id: NodeId) -> Option<Button> {
        let idx = self.nodes.iter().position(|(nid, _)| *nid == id)?;
        tracing::debug!(id = id.0, "detached node");
        Some(self.nodes.remove(idx).1)
    }

    /// Apply a viewport change and re-lay out every attached node.
    #[tracing::instrument(skip(self))]
    pub fn set_viewport(&mut self, width: f64, height: f64) -> BoutonResult<()> {
        self.viewport = Viewport::new(width, height);
        for (_, button) in self.nodes.iter_mut() {
            button.layout(self.viewport, &mut self.text)?;
        }
        Ok(())
    }

    /// Dispatch a pointer tap. The topmost node (most recently attached)
    /// whose composite bounds contain the point consumes the tap; returns
    /// whether a click callback actually ran.
    pub fn pointer_tap(&mut self, x: f64, y: f64) -> bool {
        let point = Point::new(x, y);
        for (_, button) in self.nodes.iter_mut().rev() {
            if button.contains(point) {
                return button.tap();
            }
        }
        false
    }

    pub fn get(&self, id: NodeId) -> Option<&Button> {
        self.nodes
            .iter()
            .find(|(nid, _)| *nid == id)
            .map(|(_, b)| b)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Button> {
        self.nodes
            .iter_mut()
            .find(|(nid, _)| *nid == id)
            .map(|(_, b)| b)
    }

    /// Attached nodes in attach (paint) order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Button)> {
        self.nodes.iter().map(|(id, b)| (*id, b))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::solver::Coord;
    use crate::widget::button::ButtonBuilder;
    use std::cell::Cell;
    use std::rc::Rc;

    fn stage() -> Stage {
        Stage::new(Viewport::new(1000.0, 800.0))
    }

    #[test]
    fn attach_lays_out_against_current_viewport() {
        let mut stage = stage();
        let id = stage
            .attach(
                ButtonBuilder::new()
                    .position(Coord::Percent(50.0), Coord::Percent(75.0))
                    .build(),
            )
            .unwrap();

        let button = stage.get(id).unwrap();
        assert_eq!(button.position(), Point::new(425.0, 560.0));
    }

    #[test]
    fn viewport_change_relayouts_attached_nodes() {
        let mut stage = stage();
        let id = stage
            .attach(
                ButtonBuilder::new()
                    .position(Coord::Percent(50.0), Coord::Auto)
                    .build(),
            )
            .unwrap();

        stage.set_viewport(500.0, 400.0).unwrap();
        let button = stage.get(id).unwrap();
        assert_eq!(button.position().x, 250.0 - 75.0);
        assert_eq!(button.position().y, (400.0 - 80.0) * 0.5);
    }

    #[test]
    fn detach_drops_the_resize_subscription() {
        let mut stage = stage();
        let id = stage
            .attach(
                ButtonBuilder::new()
                    .position(Coord::Percent(50.0), Coord::Percent(50.0))
                    .build(),
            )
            .unwrap();

        let button = stage.detach(id).unwrap();
        let before = button.position();
        assert!(stage.get(id).is_none());
        assert!(stage.is_empty());

        // Later viewport changes no longer touch the detached node.
        stage.set_viewport(10.0, 10.0).unwrap();
        assert_eq!(button.position(), before);
    }

    #[test]
    fn tap_hits_topmost_node_first() {
        let mut stage = stage();
        let bottom_hits = Rc::new(Cell::new(0u32));
        let top_hits = Rc::new(Cell::new(0u32));

        let seen = bottom_hits.clone();
        stage
            .attach(
                ButtonBuilder::new()
                    .position(Coord::Px(0.0), Coord::Px(0.0))
                    .on_click(move || seen.set(seen.get() + 1))
                    .build(),
            )
            .unwrap();

        let seen = top_hits.clone();
        stage
            .attach(
                ButtonBuilder::new()
                    .position(Coord::Px(0.0), Coord::Px(0.0))
                    .on_click(move || seen.set(seen.get() + 1))
                    .build(),
            )
            .unwrap();

        assert!(stage.pointer_tap(10.0, 10.0));
        assert_eq!(top_hits.get(), 1);
        assert_eq!(bottom_hits.get(), 0);

        // Outside both.
        assert!(!stage.pointer_tap(900.0, 700.0));
    }

    #[test]
    fn tap_on_callbackless_button_is_unhandled() {
        let mut stage = stage();
        stage
            .attach(
                ButtonBuilder::new()
                    .position(Coord::Px(0.0), Coord::Px(0.0))
                    .build(),
            )
            .unwrap();
        assert!(!stage.pointer_tap(10.0, 10.0));
    }
}
