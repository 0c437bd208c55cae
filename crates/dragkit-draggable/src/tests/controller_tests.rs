use super::*;

use dragkit_core::Runtime;
use std::cell::Cell;

#[derive(Debug, Clone, PartialEq)]
enum Report {
    Start(Point),
    Move(Point),
    End(Point),
}

#[derive(Default)]
struct RecordingSink {
    reports: RefCell<Vec<Report>>,
}

impl RecordingSink {
    fn reports(&self) -> Vec<Report> {
        self.reports.borrow().clone()
    }
}

impl DragReportSink for RecordingSink {
    fn drag_start(&self, _id: &DraggableId, point: Point) {
        self.reports.borrow_mut().push(Report::Start(point));
    }

    fn drag_move(&self, _id: &DraggableId, point: Point) {
        self.reports.borrow_mut().push(Report::Move(point));
    }

    fn drag_end(&self, _id: &DraggableId, point: Point) {
        self.reports.borrow_mut().push(Report::End(point));
    }
}

fn controller_with(
    runtime: &Runtime,
    config: DraggableConfig,
) -> (GestureController, Rc<RecordingSink>) {
    let sink = Rc::new(RecordingSink::default());
    let controller = GestureController::new(
        DraggableId::generate(),
        config,
        runtime.handle(),
        sink.clone(),
    );
    (controller, sink)
}

fn down(x: f32, y: f32) -> PointerEvent {
    PointerEvent::down(Point::new(x, y))
}

fn moved(x: f32, y: f32, dx: f32, dy: f32) -> PointerEvent {
    PointerEvent::moved(Point::new(x, y)).with_translation(Offset::new(dx, dy))
}

fn up(x: f32, y: f32, dx: f32, dy: f32) -> PointerEvent {
    PointerEvent::up(Point::new(x, y)).with_translation(Offset::new(dx, dy))
}

fn cancel(x: f32, y: f32, dx: f32, dy: f32) -> PointerEvent {
    PointerEvent::cancel(Point::new(x, y)).with_translation(Offset::new(dx, dy))
}

fn counting_presses(controller: &GestureController) -> Rc<Cell<u32>> {
    let presses = Rc::new(Cell::new(0));
    let counter = Rc::clone(&presses);
    controller.set_on_press(Some(Rc::new(move || counter.set(counter.get() + 1))));
    presses
}

#[test]
fn release_before_long_press_reports_only_end() {
    let runtime = Runtime::new();
    let (controller, sink) = controller_with(&runtime, DraggableConfig::default());

    controller.handle_pointer(down(10.0, 10.0));
    runtime.advance_to(1199);
    controller.handle_pointer(moved(30.0, 10.0, 20.0, 0.0));
    controller.handle_pointer(up(30.0, 10.0, 20.0, 0.0));
    runtime.advance_by(2_000);

    assert_eq!(sink.reports(), vec![Report::End(Point::new(30.0, 10.0))]);
    assert!(!controller.is_drag_armed());
    assert_eq!(controller.feedback_stage(), None);
    assert_eq!(controller.phase(), GesturePhase::Idle);
}

#[test]
fn long_press_arms_after_delay() {
    let runtime = Runtime::new();
    let (controller, sink) = controller_with(&runtime, DraggableConfig::default());

    controller.handle_pointer(down(10.0, 10.0));
    assert_eq!(controller.phase(), GesturePhase::Pressed);
    assert!(controller.has_pending_long_press());

    runtime.advance_to(1199);
    assert_eq!(controller.phase(), GesturePhase::Pressed);
    assert_eq!(controller.feedback_stage(), None);

    runtime.advance_to(1201);
    assert_eq!(controller.phase(), GesturePhase::Armed);
    assert!(!controller.has_pending_long_press());
    assert!(controller.is_feedback_active());
    assert_eq!(controller.feedback_stage(), Some(0));
    assert!(sink.reports().is_empty());
}

#[test]
fn feedback_runs_three_stages_while_held() {
    let runtime = Runtime::new();
    let config = DraggableConfig::default().with_scale(1.2);
    let (controller, _sink) = controller_with(&runtime, config);

    controller.handle_pointer(down(0.0, 0.0));
    runtime.advance_to(1200);
    runtime.advance_by(320);
    assert_eq!(controller.feedback_stage(), Some(1));

    runtime.advance_by(2_000);
    assert!(!controller.is_feedback_active());
    assert_eq!(controller.feedback_stage(), Some(2));
    assert_eq!(controller.scale(), FEEDBACK_HELD_SCALE);
}

#[test]
fn first_armed_move_reports_start_then_move() {
    let runtime = Runtime::new();
    let (controller, sink) = controller_with(&runtime, DraggableConfig::default());

    controller.handle_pointer(down(10.0, 10.0));
    runtime.advance_to(1300);
    controller.handle_pointer(moved(20.0, 20.0, 10.0, 10.0));
    assert_eq!(controller.phase(), GesturePhase::Dragging);
    controller.handle_pointer(moved(40.0, 40.0, 30.0, 30.0));
    controller.handle_pointer(up(40.0, 40.0, 30.0, 30.0));

    // drag_start carries the first move's position, not the press position.
    assert_eq!(
        sink.reports(),
        vec![
            Report::Start(Point::new(20.0, 20.0)),
            Report::Move(Point::new(20.0, 20.0)),
            Report::Move(Point::new(40.0, 40.0)),
            Report::End(Point::new(40.0, 40.0)),
        ]
    );
    assert!(!controller.is_drag_started());
}

#[test]
fn moves_before_arming_only_track_offset() {
    let runtime = Runtime::new();
    let (controller, sink) = controller_with(&runtime, DraggableConfig::default());

    controller.handle_pointer(down(0.0, 0.0));
    controller.handle_pointer(moved(5.0, 3.0, 5.0, 3.0));

    assert!(sink.reports().is_empty());
    assert_eq!(controller.pan_offset(), Offset::new(5.0, 3.0));
    assert_eq!(controller.phase(), GesturePhase::Pressed);
}

#[test]
fn translation_falls_back_to_origin_distance() {
    let runtime = Runtime::new();
    let (controller, _sink) = controller_with(&runtime, DraggableConfig::default());

    controller.handle_pointer(down(100.0, 100.0));
    controller.handle_pointer(PointerEvent::moved(Point::new(104.0, 90.0)));
    assert_eq!(controller.pan_offset(), Offset::new(4.0, -10.0));

    controller.handle_pointer(PointerEvent::up(Point::new(110.0, 110.0)));
    assert!(controller.is_tap_pending());
}

#[test]
fn cancel_reports_end_exactly_once() {
    let runtime = Runtime::new();
    let (controller, sink) = controller_with(&runtime, DraggableConfig::default());

    controller.handle_pointer(down(0.0, 0.0));
    runtime.advance_to(1250);
    controller.handle_pointer(moved(50.0, 0.0, 50.0, 0.0));
    controller.handle_pointer(PointerEvent::cancel(Point::new(50.0, 0.0)));
    controller.handle_pointer(PointerEvent::cancel(Point::new(50.0, 0.0)));
    controller.handle_pointer(up(50.0, 0.0, 50.0, 0.0));

    let ends = sink
        .reports()
        .into_iter()
        .filter(|report| matches!(report, Report::End(_)))
        .count();
    assert_eq!(ends, 1);
    assert_eq!(controller.phase(), GesturePhase::Idle);
    assert!(!controller.is_tap_pending());
}

#[test]
fn slop_boundary_is_inclusive() {
    let runtime = Runtime::new();
    let (controller, _sink) = controller_with(&runtime, DraggableConfig::default());

    controller.handle_pointer(down(100.0, 100.0));
    controller.handle_pointer(up(115.0, 100.0, 15.0, 0.0));
    assert!(controller.is_tap_pending());

    runtime.advance_by(100);
    controller.handle_pointer(down(100.0, 100.0));
    controller.handle_pointer(up(116.0, 100.0, 16.0, 0.0));
    assert!(!controller.is_tap_pending());

    runtime.advance_by(100);
    controller.handle_pointer(down(100.0, 100.0));
    controller.handle_pointer(up(100.0, 84.0, 0.0, -16.0));
    assert!(!controller.is_tap_pending());
}

#[test]
fn tap_completion_restores_scale_and_presses() {
    let runtime = Runtime::new();
    let (controller, _sink) = controller_with(&runtime, DraggableConfig::default());
    let presses = Rc::new(Cell::new(0));
    {
        let presses = Rc::clone(&presses);
        controller.set_on_press(Some(Rc::new(move || presses.set(presses.get() + 1))));
    }

    controller.handle_pointer(down(10.0, 10.0));
    runtime.advance_to(1400);
    assert_ne!(controller.scale(), REST_SCALE);
    controller.handle_pointer(up(12.0, 11.0, 2.0, 1.0));

    runtime.advance_by(39);
    assert_eq!(presses.get(), 0);
    assert!(controller.is_tap_pending());

    runtime.advance_by(1);
    assert_eq!(presses.get(), 1);
    assert!(!controller.is_tap_pending());

    runtime.advance_by(2_000);
    assert_eq!(controller.scale(), REST_SCALE);
    assert_eq!(presses.get(), 1);
}

#[test]
fn release_mid_sequence_finishes_stage_without_continuing() {
    let runtime = Runtime::new();
    let (controller, _sink) = controller_with(&runtime, DraggableConfig::default());

    controller.handle_pointer(down(0.0, 0.0));
    runtime.advance_to(1300);
    controller.handle_pointer(moved(60.0, 0.0, 60.0, 0.0));
    controller.handle_pointer(up(60.0, 0.0, 60.0, 0.0));
    assert!(!controller.is_feedback_active());

    runtime.advance_by(2_000);
    assert_eq!(controller.feedback_stage(), Some(0));
    assert_eq!(controller.scale(), controller.config().scale);
}

#[test]
fn bounce_back_springs_offset_home() {
    let runtime = Runtime::new();
    let (controller, _sink) = controller_with(&runtime, DraggableConfig::default());

    controller.handle_pointer(down(0.0, 0.0));
    runtime.advance_to(1300);
    controller.handle_pointer(moved(80.0, 40.0, 80.0, 40.0));
    controller.handle_pointer(up(80.0, 40.0, 80.0, 40.0));
    runtime.advance_by(3_000);

    assert_eq!(controller.pan_offset(), Offset::ZERO);
}

#[test]
fn without_bounce_back_offset_stays() {
    let runtime = Runtime::new();
    let config = DraggableConfig::default().with_bounce_back(false);
    let (controller, _sink) = controller_with(&runtime, config);

    controller.handle_pointer(down(0.0, 0.0));
    runtime.advance_to(1300);
    controller.handle_pointer(moved(80.0, 40.0, 80.0, 40.0));
    controller.handle_pointer(up(80.0, 40.0, 80.0, 40.0));
    runtime.advance_by(3_000);

    assert_eq!(controller.pan_offset(), Offset::new(80.0, 40.0));
}

#[test]
fn second_pointer_down_does_not_restart_timer() {
    let runtime = Runtime::new();
    let (controller, _sink) = controller_with(&runtime, DraggableConfig::default());

    controller.handle_pointer(down(0.0, 0.0));
    runtime.advance_to(500);
    controller.handle_pointer(down(5.0, 5.0));
    runtime.advance_to(1200);

    assert_eq!(controller.phase(), GesturePhase::Armed);
}

#[test]
fn timer_from_released_gesture_never_arms_next_one() {
    let runtime = Runtime::new();
    let (controller, _sink) = controller_with(&runtime, DraggableConfig::default());

    controller.handle_pointer(down(0.0, 0.0));
    runtime.advance_to(500);
    controller.handle_pointer(up(0.0, 0.0, 0.0, 0.0));
    runtime.advance_to(600);
    controller.handle_pointer(down(0.0, 0.0));

    runtime.advance_to(1250);
    assert_eq!(controller.phase(), GesturePhase::Pressed);

    runtime.advance_to(1800);
    assert_eq!(controller.phase(), GesturePhase::Armed);
}

#[test]
fn dispose_cancels_pending_work_and_ignores_input() {
    let runtime = Runtime::new();
    let (controller, sink) = controller_with(&runtime, DraggableConfig::default());

    controller.handle_pointer(down(0.0, 0.0));
    controller.dispose();
    assert!(!controller.has_pending_long_press());
    runtime.advance_by(2_000);

    assert!(!controller.is_drag_armed());
    controller.handle_pointer(down(0.0, 0.0));
    controller.handle_pointer(up(0.0, 0.0, 0.0, 0.0));
    assert!(sink.reports().is_empty());
    assert!(controller.is_disposed());
    assert!(!runtime.has_pending_work());
}

#[test]
fn idle_input_is_ignored() {
    let runtime = Runtime::new();
    let (controller, sink) = controller_with(&runtime, DraggableConfig::default());

    controller.handle_pointer(moved(5.0, 5.0, 5.0, 5.0));
    controller.handle_pointer(up(5.0, 5.0, 5.0, 5.0));

    assert!(sink.reports().is_empty());
    assert_eq!(controller.pan_offset(), Offset::ZERO);
}

#[test]
fn cancel_within_slop_restores_scale_without_press() {
    let runtime = Runtime::new();
    let (controller, sink) = controller_with(&runtime, DraggableConfig::default());
    let presses = counting_presses(&controller);

    controller.handle_pointer(down(10.0, 10.0));
    runtime.advance_to(1400);
    controller.handle_pointer(moved(20.0, 10.0, 10.0, 0.0));
    controller.handle_pointer(cancel(20.0, 10.0, 10.0, 0.0));
    assert!(!controller.is_tap_pending());

    runtime.advance_by(3_000);
    assert_eq!(controller.scale(), REST_SCALE);
    assert_eq!(presses.get(), 0);
    assert_eq!(sink.reports().last(), Some(&Report::End(Point::new(20.0, 10.0))));
}

#[test]
fn cancel_outside_slop_leaves_scale_like_up() {
    let runtime = Runtime::new();
    let (cancelled, _cancel_sink) = controller_with(&runtime, DraggableConfig::default());
    let (released, _up_sink) = controller_with(&runtime, DraggableConfig::default());

    cancelled.handle_pointer(down(0.0, 0.0));
    released.handle_pointer(down(0.0, 0.0));
    runtime.advance_to(1400);
    cancelled.handle_pointer(moved(16.0, 0.0, 16.0, 0.0));
    released.handle_pointer(moved(16.0, 0.0, 16.0, 0.0));
    cancelled.handle_pointer(cancel(16.0, 0.0, 16.0, 0.0));
    released.handle_pointer(up(16.0, 0.0, 16.0, 0.0));

    runtime.advance_by(3_000);
    assert_eq!(cancelled.scale(), cancelled.config().scale);
    assert_eq!(cancelled.scale(), released.scale());
}

#[test]
fn new_press_completes_pending_tap_first() {
    let runtime = Runtime::new();
    let (controller, _sink) = controller_with(&runtime, DraggableConfig::default());
    let presses = counting_presses(&controller);

    controller.handle_pointer(down(0.0, 0.0));
    controller.handle_pointer(up(0.0, 0.0, 0.0, 0.0));
    runtime.advance_by(10);
    assert!(controller.is_tap_pending());

    controller.handle_pointer(down(0.0, 0.0));
    assert_eq!(presses.get(), 1);
    assert!(!controller.is_tap_pending());
    assert_eq!(controller.phase(), GesturePhase::Pressed);

    runtime.advance_by(100);
    assert_eq!(presses.get(), 1);
    assert_eq!(controller.phase(), GesturePhase::Pressed);
}
