//! Board layout: row sequencing, link lanes and the rendered view.
//!
//! # Pipeline
//!
//! 1. [`RowSequence`] orders room lines, the blank separator and chamber
//!    lines, and resolves each room line's link into row indices.
//! 2. [`normalize_links`] turns those into [`NormalizedLink`]s sorted by
//!    their upper row.
//! 3. [`LaneAllocator`] gives every link a lane and emits per-row
//!    [`Marker`]s.
//! 4. [`BoardView`] bundles rows, markers and the comment indent for the
//!    renderer.
//!
//! # Usage
//!
//! ```
//! use u_board::board::{link_table, Marker, MarkerKind, NormalizedLink};
//!
//! let links = [NormalizedLink::new(0, 2, false), NormalizedLink::new(1, 3, false)];
//! let rows = link_table(&links, 4);
//!
//! // The links cross, so the second one is drawn one lane further out.
//! assert_eq!(rows[1], vec![Marker::new(MarkerKind::Down, 16), Marker::new(MarkerKind::Out, 32)]);
//! ```

mod lanes;
mod sequencer;
mod view;

pub use lanes::{
    comment_indent, link_table, LaneAllocator, Marker, MarkerKind, NormalizedLink, Placement,
    ARROW_WIDTH,
};
pub use sequencer::{normalize_links, RawLink, RowKind, RowSequence, BLANK_ROW_ID};
pub use view::{BoardRow, BoardView};
