/// Terminal rendering for palcycle.
///
/// Half-block scene canvas, viewport panning, frame statistics and the
/// overlay UI (status line, notices, help, errors).
pub mod canvas;
pub mod fps;
pub mod ui;
pub mod viewport;
