//! Shared names and timing constants for the page behaviors.

// ── Timing ──────────────────────────────────────────────────────

/// Countdown tick period in milliseconds.
pub const TICK_MS: u32 = 1000;

/// Trailing window for resize-driven relocation, in milliseconds.
pub const RESIZE_THROTTLE_MS: u32 = 500;

/// Period of one modal fade step, in milliseconds.
pub const MODAL_STEP_MS: u32 = 20;

// ── Modal fade ──────────────────────────────────────────────────

/// Backdrop alpha at the start of a fade-in.
pub const FADE_ALPHA_START: f64 = 0.01;

/// Backdrop alpha where a fade-in ends and a fade-out starts.
pub const FADE_ALPHA_PEAK: f64 = 0.56;

/// A fade-out ends once alpha drops to this value or below.
pub const FADE_ALPHA_FLOOR: f64 = 0.1;

/// Alpha change per fade step.
pub const FADE_ALPHA_STEP: f64 = 0.1;

// ── Markup ──────────────────────────────────────────────────────

/// Attribute on countdown elements holding the duration in seconds.
pub const COUNTER_ATTRIBUTE: &str = "data-counter";

/// Selector for countdown display elements.
pub const COUNTER_SELECTOR: &str = ".video-counter";

/// Attribute marking relocation anchors; its value is the subject id.
pub const ANCHOR_ATTRIBUTE: &str = "data-element-dom-anchor";

/// Selector for floating-label rows.
pub const INPUT_ROW_SELECTOR: &str = ".input-row";

/// Selector for the input inside a floating-label row.
pub const INPUT_SELECTOR: &str = ".input-row__input-text";

/// Selector for the label inside a floating-label row.
pub const TITLE_SELECTOR: &str = ".input-row__title";

/// Class applied to a raised label.
pub const TITLE_RAISED_CLASS: &str = "input-row__title--focus";

/// Attribute on buttons naming the modal they open.
pub const MODAL_TRIGGER_ATTRIBUTE: &str = "data-modal-id";

/// Selector for modal containers.
pub const MODAL_SELECTOR: &str = ".modal";

/// Selector for close buttons inside a modal.
pub const MODAL_CLOSE_SELECTOR: &str = ".modal-close";

/// Selector for the content holder inside a modal.
pub const MODAL_HOLDER_SELECTOR: &str = ".modal__holder";

/// Class toggled on open modals and their holders.
pub const VISIBLE_CLASS: &str = "visible";

/// Class on `<body>` that locks page scrolling while a modal is open.
pub const SCROLL_LOCK_CLASS: &str = "no-overflow";

/// Id of the `<video>` element that shows the camera preview.
pub const PREVIEW_ELEMENT_ID: &str = "live-stream";

/// Id of the optional JSON config island.
pub const CONFIG_ELEMENT_ID: &str = "page-config";
