//! Card carousel: paging, drag with edge resistance, and momentum snapping.
//!
//! [`CarouselController`] owns all carousel state and talks to the page only
//! through [`CarouselView`], so it runs unchanged against a fake view in tests.
//! The web-sys binding lives in `carousel_dom`.

use log::debug;

use super::frame::RepeatingTask;
use super::viewport::Viewport;
use crate::config::CarouselConfig;

/// Everything the controller reads from or writes to the page.
pub trait CarouselView {
    fn viewport_width(&self) -> f64;
    /// Inner width of the scrollable track.
    fn container_width(&self) -> f64;
    /// Gap between cards in the track.
    fn gap(&self) -> f64;
    /// Rendered width plus right margin of a single card.
    fn card_extent(&self) -> f64;
    /// Requests an animated scroll of the track. Completion is not reported.
    fn scroll_to(&self, offset: f64);
    /// Moves the track immediately, used while dragging.
    fn set_scroll_left(&self, offset: f64);
    fn set_shrink(&self, card: usize, shrink: bool);
    fn set_buttons(&self, prev_disabled: bool, next_disabled: bool);
    /// Replaces the pagination dots with `count` fresh ones.
    fn render_dots(&self, count: usize, active: usize);
}

#[derive(Debug, Clone, Default)]
struct DragState {
    start_position: f64,
    last_position: f64,
    last_time: f64,
    velocity: f64,
    active_card: Option<usize>,
}

pub struct CarouselController<V, F> {
    view: V,
    frames: F,
    config: CarouselConfig,
    card_count: usize,
    current_index: usize,
    cards_per_view: usize,
    current_translate: f64,
    prev_translate: f64,
    drag: Option<DragState>,
}

impl<V: CarouselView, F: RepeatingTask> CarouselController<V, F> {
    /// Returns `None` when there are no cards to page through.
    pub fn new(view: V, frames: F, card_count: usize, config: CarouselConfig) -> Option<Self> {
        if card_count == 0 {
            return None;
        }
        let cards_per_view =
            Viewport::from_width(view.viewport_width(), &config).cards_per_view();
        let controller = Self {
            view,
            frames,
            config,
            card_count,
            current_index: 0,
            cards_per_view,
            current_translate: 0.0,
            prev_translate: 0.0,
            drag: None,
        };
        controller.update_navigation();
        Some(controller)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn cards_per_view(&self) -> usize {
        self.cards_per_view
    }

    pub fn card_count(&self) -> usize {
        self.card_count
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn current_translate(&self) -> f64 {
        self.current_translate
    }

    /// Number of full pages; informational only, paging moves one card at a time.
    pub fn total_slides(&self) -> usize {
        self.card_count.div_ceil(self.cards_per_view)
    }

    /// Highest index that still fills the view. Collapses to 0 with too few cards.
    pub fn max_index(&self) -> usize {
        self.card_count.saturating_sub(self.cards_per_view)
    }

    pub fn dot_count(&self) -> usize {
        self.max_index() + 1
    }

    fn viewport(&self) -> Viewport {
        Viewport::from_width(self.view.viewport_width(), &self.config)
    }

    /// Moves by `direction` cards; 0 re-settles at the current index.
    ///
    /// Returns `false`, changing nothing, when the target is out of range.
    pub fn navigate(&mut self, direction: isize) -> bool {
        let Some(new_index) = self.current_index.checked_add_signed(direction) else {
            return false;
        };
        if new_index > self.max_index() {
            return false;
        }
        self.current_index = new_index;

        let gap = self.view.gap();
        let card_width = self.viewport().card_width(self.view.container_width(), gap);
        let offset = new_index as f64 * (card_width + gap);
        self.view.scroll_to(offset);

        self.current_translate = -offset;
        self.prev_translate = -offset;
        debug!("Carousel at card {} (offset {})", new_index, offset);

        self.update_navigation();
        true
    }

    /// Jumps to `index` as a dot click does.
    pub fn go_to(&mut self, index: usize) -> bool {
        let diff = index as isize - self.current_index as isize;
        if diff == 0 {
            return false;
        }
        self.navigate(diff)
    }

    pub fn prev(&mut self) -> bool {
        self.navigate(-1)
    }

    pub fn next(&mut self) -> bool {
        self.navigate(1)
    }

    fn update_navigation(&self) {
        self.view
            .set_buttons(self.current_index == 0, self.current_index >= self.max_index());
        self.view.render_dots(self.dot_count(), self.current_index);
    }

    pub fn resize(&mut self) {
        self.cards_per_view = self.viewport().cards_per_view();
        self.current_index = self.current_index.min(self.max_index());
        self.navigate(0);
    }

    pub fn drag_start(&mut self, position: f64, time: f64, card: Option<usize>) {
        self.frames.cancel();
        if let Some(previous) = self.drag.take().and_then(|drag| drag.active_card) {
            self.view.set_shrink(previous, false);
        }

        let active_card = card.filter(|card| *card < self.card_count);
        if let Some(card) = active_card {
            self.view.set_shrink(card, true);
        }

        self.drag = Some(DragState {
            start_position: position,
            last_position: position,
            last_time: time,
            velocity: 0.0,
            active_card,
        });
        self.frames.start();
    }

    pub fn drag_move(&mut self, position: f64, time: f64) {
        let at_first = self.current_index == 0;
        let at_last = self.current_index >= self.max_index();
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        let diff = position - drag.start_position;
        let elapsed = time - drag.last_time;
        if elapsed > 0.0 {
            drag.velocity = (position - drag.last_position) / elapsed;
        }
        drag.last_position = position;
        drag.last_time = time;

        if (at_first && diff > 0.0) || (at_last && diff < 0.0) {
            let resistance = (self.config.edge_resistance
                - diff.abs() / self.config.edge_resistance_falloff)
                .max(self.config.edge_resistance_min);
            self.current_translate = self.prev_translate + diff * resistance;
        } else {
            self.current_translate = self.prev_translate + diff;
        }
    }

    pub fn drag_end(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.frames.cancel();
        if let Some(card) = drag.active_card {
            self.view.set_shrink(card, false);
        }

        let moved_by = self.current_translate - self.prev_translate;
        let direction = self.release_direction(moved_by, drag.velocity);

        // A fling past either end is rejected; settle back instead of leaving the track displaced.
        if !self.navigate(direction) && direction != 0 {
            self.navigate(0);
        }
        self.prev_translate = self.current_translate;
    }

    fn release_direction(&self, moved_by: f64, velocity: f64) -> isize {
        let threshold = self.config.snap_distance.min(self.view.card_extent() / 5.0);
        let momentum = velocity.abs() > self.config.momentum_velocity;

        if moved_by.abs() > threshold || momentum {
            if moved_by.abs() > self.config.direction_distance {
                // Dragging right reveals the previous card.
                if moved_by > 0.0 { -1 } else { 1 }
            } else if momentum {
                if velocity > 0.0 { -1 } else { 1 }
            } else {
                0
            }
        } else {
            0
        }
    }

    /// Per-frame sync while dragging. Returns whether to keep running.
    pub fn sync_frame(&self) -> bool {
        if self.drag.is_none() {
            return false;
        }
        self.view.set_scroll_left(-self.current_translate);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::interactions::frame::testing::FakeFrames;

    #[derive(Default)]
    struct ViewState {
        viewport_width: Cell<f64>,
        scrolls: RefCell<Vec<f64>>,
        scroll_left: Cell<f64>,
        shrunk: RefCell<Vec<usize>>,
        buttons: Cell<(bool, bool)>,
        dots: Cell<(usize, usize)>,
    }

    #[derive(Clone)]
    struct FakeView(Rc<ViewState>);

    impl FakeView {
        fn new(viewport_width: f64) -> Self {
            let state = ViewState::default();
            state.viewport_width.set(viewport_width);
            FakeView(Rc::new(state))
        }
    }

    impl CarouselView for FakeView {
        fn viewport_width(&self) -> f64 {
            self.0.viewport_width.get()
        }
        fn container_width(&self) -> f64 {
            // Desktop track: three 300px cards with two 30px gaps.
            960.0
        }
        fn gap(&self) -> f64 {
            30.0
        }
        fn card_extent(&self) -> f64 {
            300.0
        }
        fn scroll_to(&self, offset: f64) {
            self.0.scrolls.borrow_mut().push(offset);
        }
        fn set_scroll_left(&self, offset: f64) {
            self.0.scroll_left.set(offset);
        }
        fn set_shrink(&self, card: usize, shrink: bool) {
            let mut shrunk = self.0.shrunk.borrow_mut();
            if shrink {
                shrunk.push(card);
            } else {
                shrunk.retain(|c| *c != card);
            }
        }
        fn set_buttons(&self, prev_disabled: bool, next_disabled: bool) {
            self.0.buttons.set((prev_disabled, next_disabled));
        }
        fn render_dots(&self, count: usize, active: usize) {
            self.0.dots.set((count, active));
        }
    }

    type Controller = CarouselController<FakeView, FakeFrames>;

    fn controller(viewport_width: f64, cards: usize) -> (Controller, FakeView, FakeFrames) {
        let view = FakeView::new(viewport_width);
        let frames = FakeFrames::default();
        let controller =
            CarouselController::new(view.clone(), frames.clone(), cards, CarouselConfig::default())
                .unwrap();
        (controller, view, frames)
    }

    fn drag(controller: &mut Controller, from: f64, to: f64, duration: f64) {
        controller.drag_start(from, 0.0, None);
        controller.drag_move(to, duration);
        controller.drag_end();
    }

    #[test]
    fn test_no_cards_means_no_controller() {
        let controller = CarouselController::new(
            FakeView::new(1200.0),
            FakeFrames::default(),
            0,
            CarouselConfig::default(),
        );
        assert!(controller.is_none());
    }

    #[test]
    fn test_initial_state() {
        let (controller, view, _) = controller(1200.0, 6);
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.cards_per_view(), 3);
        assert_eq!(controller.total_slides(), 2);
        assert_eq!(view.0.buttons.get(), (true, false));
        assert_eq!(view.0.dots.get(), (4, 0));
    }

    #[test]
    fn test_navigate_scrolls_by_card_and_gap() {
        let (mut controller, view, _) = controller(1200.0, 6);
        assert!(controller.next());
        assert!(controller.next());
        assert_eq!(controller.current_index(), 2);
        assert_eq!(*view.0.scrolls.borrow(), vec![330.0, 660.0]);
        assert_eq!(controller.current_translate(), -660.0);
        assert_eq!(view.0.dots.get(), (4, 2));
    }

    #[test]
    fn test_out_of_range_navigation_is_rejected() {
        let (mut controller, view, _) = controller(1200.0, 6);
        assert!(!controller.prev());
        assert!(view.0.scrolls.borrow().is_empty());

        for _ in 0..10 {
            controller.next();
        }
        assert_eq!(controller.current_index(), 3);
        assert_eq!(view.0.buttons.get(), (false, true));
        assert!(!controller.navigate(1));
        assert!(!controller.navigate(-4));
        assert_eq!(controller.current_index(), 3);
    }

    #[test]
    fn test_index_stays_in_range_for_mixed_sequences() {
        let (mut controller, view, _) = controller(900.0, 7);
        let steps = [1, 1, -1, 1, 1, 1, 1, 1, 1, -1, -1, 0, 1, -1, -1, -1, -1, -1, -1, -1];
        for step in steps {
            controller.navigate(step);
            assert!(controller.current_index() <= 5);
            let (count, active) = view.0.dots.get();
            assert_eq!(count, 7 - (2 - 1));
            assert_eq!(active, controller.current_index());
        }
    }

    #[test]
    fn test_dot_click_jumps_directly() {
        let (mut controller, view, _) = controller(500.0, 5);
        assert!(controller.go_to(3));
        assert_eq!(controller.current_index(), 3);
        assert_eq!(view.0.dots.get(), (5, 3));
        assert!(!controller.go_to(3));
        assert!(!controller.go_to(9));
        assert_eq!(controller.current_index(), 3);
    }

    #[test]
    fn test_fewer_cards_than_view_collapses_to_single_page() {
        let (mut controller, view, _) = controller(1200.0, 2);
        assert_eq!(controller.max_index(), 0);
        assert_eq!(view.0.dots.get(), (1, 0));
        assert_eq!(view.0.buttons.get(), (true, true));
        assert!(controller.navigate(0));
        assert!(!controller.next());
    }

    #[test]
    fn test_small_slow_drag_snaps_back() {
        let (mut controller, view, _) = controller(1200.0, 6);
        controller.next();
        // 40px over 200ms: under the 50px threshold and 0.2 px/ms.
        drag(&mut controller, 500.0, 460.0, 200.0);
        assert_eq!(controller.current_index(), 1);
        assert_eq!(view.0.scrolls.borrow().last(), Some(&330.0));
    }

    #[test]
    fn test_drag_right_past_threshold_goes_back() {
        let (mut controller, _, _) = controller(1200.0, 6);
        controller.next();
        drag(&mut controller, 400.0, 480.0, 400.0);
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn test_drag_left_past_threshold_goes_forward() {
        let (mut controller, _, _) = controller(1200.0, 6);
        drag(&mut controller, 400.0, 320.0, 400.0);
        assert_eq!(controller.current_index(), 1);
    }

    #[test]
    fn test_fast_flick_uses_velocity_direction() {
        let (mut controller, _, _) = controller(1200.0, 6);
        controller.next();
        controller.drag_start(400.0, 0.0, None);
        controller.drag_move(404.0, 50.0);
        controller.drag_move(408.0, 55.0);
        controller.drag_end();
        // Only 8px moved, but the last sample ran at 0.8 px/ms to the right.
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn test_velocity_between_samples() {
        let (mut controller, _, _) = controller(1200.0, 6);
        controller.next();
        controller.drag_start(400.0, 0.0, None);
        controller.drag_move(300.0, 500.0);
        controller.drag_move(303.0, 510.0);
        controller.drag_move(303.0, 510.0);
        controller.drag_end();
        // Far left drag wins over the small rightward velocity.
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn test_edge_resistance_at_first_card() {
        let (mut controller, _, _) = controller(1200.0, 6);
        controller.drag_start(100.0, 0.0, None);
        controller.drag_move(200.0, 100.0);
        assert!((controller.current_translate() - 20.0).abs() < 1e-9);
        controller.drag_move(500.0, 200.0);
        // Floored at 0.1 once the displacement is large.
        assert!((controller.current_translate() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_edge_resistance_past_last_card() {
        let (mut controller, _, _) = controller(1200.0, 6);
        for _ in 0..3 {
            controller.next();
        }
        let base = controller.current_translate();
        controller.drag_start(600.0, 0.0, None);
        controller.drag_move(480.0, 100.0);
        let travelled = (controller.current_translate() - base).abs();
        assert!(travelled < 120.0);
        assert!(travelled > 0.0);
    }

    #[test]
    fn test_interior_drag_tracks_one_to_one() {
        let (mut controller, _, _) = controller(1200.0, 6);
        controller.next();
        controller.drag_start(600.0, 0.0, None);
        controller.drag_move(480.0, 100.0);
        assert_eq!(controller.current_translate(), -330.0 - 120.0);
    }

    #[test]
    fn test_fling_past_end_settles() {
        let (mut controller, view, _) = controller(1200.0, 6);
        drag(&mut controller, 400.0, 600.0, 200.0);
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.current_translate(), 0.0);
        assert_eq!(view.0.scrolls.borrow().last(), Some(&0.0));
    }

    #[test]
    fn test_drag_manages_frame_loop_and_shrink() {
        let (mut controller, view, frames) = controller(1200.0, 6);
        controller.drag_start(300.0, 0.0, Some(1));
        assert!(frames.is_active());
        assert_eq!(*view.0.shrunk.borrow(), vec![1]);

        controller.drag_move(250.0, 16.0);
        assert!(controller.sync_frame());
        assert_eq!(view.0.scroll_left.get(), 50.0);

        controller.drag_end();
        assert!(!frames.is_active());
        assert!(view.0.shrunk.borrow().is_empty());
        assert!(!controller.sync_frame());
        assert_eq!(frames.starts.get(), 1);
    }

    #[test]
    fn test_restarting_drag_cancels_previous_loop() {
        let (mut controller, view, frames) = controller(1200.0, 6);
        controller.drag_start(300.0, 0.0, Some(0));
        controller.drag_start(320.0, 10.0, Some(2));
        assert_eq!(frames.starts.get(), 2);
        assert!(frames.cancels.get() >= 2);
        assert_eq!(*view.0.shrunk.borrow(), vec![2]);
    }

    #[test]
    fn test_move_and_end_without_drag_are_ignored() {
        let (mut controller, view, frames) = controller(1200.0, 6);
        controller.drag_move(100.0, 10.0);
        controller.drag_end();
        assert_eq!(controller.current_translate(), 0.0);
        assert!(view.0.scrolls.borrow().is_empty());
        assert_eq!(frames.cancels.get(), 0);
    }

    #[test]
    fn test_unknown_card_is_not_shrunk() {
        let (mut controller, view, _) = controller(1200.0, 3);
        controller.drag_start(300.0, 0.0, Some(7));
        assert!(view.0.shrunk.borrow().is_empty());
    }

    #[test]
    fn test_resize_desktop_to_mobile_keeps_index() {
        let (mut controller, view, _) = controller(1200.0, 6);
        controller.next();
        controller.next();
        view.0.viewport_width.set(375.0);
        controller.resize();
        assert_eq!(controller.cards_per_view(), 1);
        assert_eq!(controller.current_index(), 2);
        assert_eq!(view.0.dots.get(), (6, 2));
        // Mobile cards fill the container.
        assert_eq!(view.0.scrolls.borrow().last(), Some(&(2.0 * (960.0 + 30.0))));
    }

    #[test]
    fn test_resize_mobile_to_desktop_clamps_index() {
        let (mut controller, view, _) = controller(375.0, 6);
        for _ in 0..5 {
            controller.next();
        }
        assert_eq!(controller.current_index(), 5);
        view.0.viewport_width.set(1440.0);
        controller.resize();
        assert_eq!(controller.current_index(), 3);
        assert_eq!(view.0.buttons.get(), (false, true));
        assert_eq!(view.0.dots.get(), (4, 3));
    }
}
