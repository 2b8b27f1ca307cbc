use damsel_rescue::grid::*;

#[test]
fn clamp_bounds_both_ends() {
    assert_eq!(clamp(-5, 0, 10), 0);
    assert_eq!(clamp(15, 0, 10), 10);
    assert_eq!(clamp(7, 0, 10), 7);
    assert_eq!(clamp(0, 0, 10), 0);
    assert_eq!(clamp(10, 0, 10), 10);
}

#[test]
fn clamp_keeps_player_on_canvas() {
    assert_eq!(clamp(MAX_Y + ROW_STEP, MIN_Y, MAX_Y), MAX_Y);
    assert_eq!(clamp(MIN_Y - ROW_STEP, MIN_Y, MAX_Y), MIN_Y);
    assert_eq!(clamp(MAX_X + CELL_WIDTH, MIN_X, MAX_X), MAX_X);
    assert_eq!(clamp(-CELL_WIDTH, MIN_X, MAX_X), MIN_X);
    assert_eq!(clamp(303.0, MIN_X, MAX_X), 303.0);
}

#[test]
fn cell_of_floors_including_negatives() {
    assert_eq!(cell_of(0.0), 0);
    assert_eq!(cell_of(100.9), 0);
    assert_eq!(cell_of(101.0), 1);
    assert_eq!(cell_of(606.0), 6);
    assert_eq!(cell_of(-0.5), -1);
    assert_eq!(cell_of(-101.0), -1);
}

#[test]
fn lanes_are_one_row_step_apart() {
    assert_eq!(lane_y(0), 213.0);
    assert_eq!(lane_y(1), 294.0);
    assert_eq!(lane_y(2), 375.0);
}

#[test]
fn every_row_is_reachable_from_spawn() {
    // Player spawn, the lanes, the gate approach and the damsel row all line
    // up on the vertical step.
    for target in [375.0, 294.0, 213.0, 132.0, 51.0, -30.0] {
        let steps = (MAX_Y - target) / ROW_STEP;
        assert_eq!(steps.fract(), 0.0, "row {target}");
    }
}

#[test]
fn columns_cover_the_board() {
    assert_eq!(column_x(0), MIN_X);
    assert_eq!(column_x(COLUMNS as u32 - 1), MAX_X);
    assert!(MAX_X + CELL_WIDTH <= CANVAS_WIDTH);
}
