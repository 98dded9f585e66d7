//! Link lane allocation.
//!
//! Every link between two rows is drawn as a vertical connector in its own
//! lane to the left of the table. Lanes are assigned greedily in ascending
//! `from` order:
//!
//! - a placed link that ends inside the new link's span (`from < to <= link_to`)
//!   pushes the new link to a lane above its own;
//! - a placed link that strictly contains the new link and sits in the
//!   candidate lane is moved one lane outwards, and the new link takes the
//!   candidate lane.
//!
//! The second rule rewrites an earlier decision, so placements are kept in an
//! indexable working list. The result is a layered set of connectors where
//! inner links hug the table and their containers wrap around them.
//!
//! # Complexity
//! O(L²) for L links: every link scans all earlier placements.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Width of one lane in pixels.
pub const ARROW_WIDTH: u32 = 16;

/// A link between two rows with `from < to`.
///
/// `reversed` records that the original reference pointed from the higher
/// row to the lower one, so the arrowhead belongs on the `from` row.
/// Deserialization rejects spans with `from >= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LinkSpan")]
pub struct NormalizedLink {
    from: usize,
    to: usize,
    reversed: bool,
}

#[derive(Deserialize)]
struct LinkSpan {
    from: usize,
    to: usize,
    #[serde(default)]
    reversed: bool,
}

impl TryFrom<LinkSpan> for NormalizedLink {
    type Error = BoardError;

    fn try_from(span: LinkSpan) -> Result<Self, Self::Error> {
        Self::try_new(span.from, span.to, span.reversed)
    }
}

/// A link with its allocated lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    lane: u32,
    link: NormalizedLink,
}

/// What to draw for a connector on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    /// The connector leaves this row downwards.
    Out,
    /// The connector passes this row.
    Down,
    /// The connector arrives at this row.
    In,
    /// Arrowhead pointing into this row (forward link ends here).
    ArrowForward,
    /// Arrowhead pointing into this row (reversed link ends here).
    ArrowBack,
}

/// A draw instruction attached to one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Marker kind.
    pub kind: MarkerKind,
    /// Horizontal offset in pixels (`lane * arrow width`, 0 for arrowheads).
    pub offset: u32,
}

/// Greedy lane allocator.
///
/// # Example
///
/// ```
/// use u_board::board::{LaneAllocator, NormalizedLink};
///
/// let links = [NormalizedLink::new(0, 3, false), NormalizedLink::new(1, 2, false)];
/// let placements = LaneAllocator::default().place(&links);
///
/// // The inner link takes lane 1 and pushes its container out to lane 2.
/// assert_eq!(placements[0].lane(), 2);
/// assert_eq!(placements[1].lane(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneAllocator {
    arrow_width: u32,
}

impl NormalizedLink {
    /// Creates a link.
    ///
    /// # Panics
    /// If `from` is not lower than `to`. Use [`NormalizedLink::try_new`] for
    /// unchecked input.
    pub fn new(from: usize, to: usize, reversed: bool) -> Self {
        assert!(from < to, "link {from} -> {to} is not normalized");
        Self { from, to, reversed }
    }

    /// Creates a link, rejecting spans with `from >= to`.
    pub fn try_new(from: usize, to: usize, reversed: bool) -> Result<Self, BoardError> {
        if from < to {
            Ok(Self { from, to, reversed })
        } else {
            Err(BoardError::UnnormalizedLink { from, to })
        }
    }

    /// Upper row index.
    pub fn from(&self) -> usize {
        self.from
    }

    /// Lower row index.
    pub fn to(&self) -> usize {
        self.to
    }

    /// Whether the reference pointed upwards (`to` → `from`).
    pub fn reversed(&self) -> bool {
        self.reversed
    }

    /// Normalizes a raw `source → target` reference.
    ///
    /// Returns `None` for a self-link.
    pub fn from_raw(source: usize, target: usize) -> Option<Self> {
        match source.cmp(&target) {
            std::cmp::Ordering::Less => Some(Self::new(source, target, false)),
            std::cmp::Ordering::Greater => Some(Self::new(target, source, true)),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Whether the spans of two links cross (partial overlap).
    ///
    /// Touching ends and strict containment are not crossings.
    pub fn crosses(&self, other: &Self) -> bool {
        let (a, b) = if self.from <= other.from {
            (self, other)
        } else {
            (other, self)
        };
        a.from < b.from && b.from < a.to && a.to < b.to
    }
}

impl Placement {
    /// Lane number, starting at 1.
    pub fn lane(&self) -> u32 {
        self.lane
    }

    /// The placed link without its lane.
    pub fn link(&self) -> NormalizedLink {
        self.link
    }

    /// Upper row index.
    pub fn from(&self) -> usize {
        self.link.from
    }

    /// Lower row index.
    pub fn to(&self) -> usize {
        self.link.to
    }

    /// Whether the arrowhead is on the `from` row.
    pub fn reversed(&self) -> bool {
        self.link.reversed
    }
}

impl MarkerKind {
    /// CSS class the board stylesheet uses for this marker.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Out => "out",
            Self::Down => "down",
            Self::In => "in",
            Self::ArrowForward => "arrow forw",
            Self::ArrowBack => "arrow back",
        }
    }
}

impl Marker {
    /// Creates a marker.
    pub fn new(kind: MarkerKind, offset: u32) -> Self {
        Self { kind, offset }
    }
}

impl LaneAllocator {
    /// Creates an allocator with the given lane width in pixels.
    pub fn new(arrow_width: u32) -> Self {
        Self { arrow_width }
    }

    /// Lane width in pixels.
    pub fn arrow_width(&self) -> u32 {
        self.arrow_width
    }

    /// Assigns a lane to every link.
    ///
    /// `links` must be sorted by ascending `from`; ties keep input order.
    /// Placements are returned in input order.
    pub fn place(&self, links: &[NormalizedLink]) -> Vec<Placement> {
        let mut placements: Vec<Placement> = Vec::with_capacity(links.len());

        for link in links {
            let mut lane = 1;
            for placed in placements.iter_mut() {
                let span = placed.link;
                if link.from < span.to && span.to <= link.to {
                    lane = lane.max(placed.lane + 1);
                } else if span.from < link.from && link.to < span.to && placed.lane == lane {
                    trace!(
                        from = span.from,
                        to = span.to,
                        lane = lane + 1;
                        "Moving container link outwards"
                    );
                    placed.lane = lane + 1;
                }
            }
            trace!(from = link.from, to = link.to, lane; "Placed link");
            placements.push(Placement { lane, link: *link });
        }

        placements
    }

    /// Turns placements into per-row marker lists.
    ///
    /// For each placement, in order: `out` on `from`, `down` on every row in
    /// between, `in` on `to`, then the arrowhead on `from` when reversed or on
    /// `to` otherwise.
    ///
    /// # Panics
    /// If a placement reaches past `total` rows.
    pub fn markers(&self, placements: &[Placement], total: usize) -> Vec<Vec<Marker>> {
        let mut rows: Vec<Vec<Marker>> = vec![Vec::new(); total];

        for p in placements {
            let NormalizedLink { from, to, reversed } = p.link;
            let offset = p.lane * self.arrow_width;
            rows[from].push(Marker::new(MarkerKind::Out, offset));
            for row in &mut rows[from + 1..to] {
                row.push(Marker::new(MarkerKind::Down, offset));
            }
            rows[to].push(Marker::new(MarkerKind::In, offset));
            if reversed {
                rows[from].push(Marker::new(MarkerKind::ArrowBack, 0));
            } else {
                rows[to].push(Marker::new(MarkerKind::ArrowForward, 0));
            }
        }

        rows
    }

    /// Allocates lanes and returns `total` marker lists.
    ///
    /// # Panics
    /// If a link reaches past `total` rows.
    pub fn link_table(&self, links: &[NormalizedLink], total: usize) -> Vec<Vec<Marker>> {
        let placements = self.place(links);
        debug!(
            links = links.len(),
            rows = total,
            lanes = placements.iter().map(|p| p.lane).max().unwrap_or(0);
            "Allocated link lanes"
        );
        self.markers(&placements, total)
    }
}

impl Default for LaneAllocator {
    fn default() -> Self {
        Self::new(ARROW_WIDTH)
    }
}

/// Allocates lanes with the default [`ARROW_WIDTH`].
///
/// `links` must be sorted by ascending `from`. Returns one marker list per
/// row; an empty `links` gives `total` empty lists.
pub fn link_table(links: &[NormalizedLink], total: usize) -> Vec<Vec<Marker>> {
    LaneAllocator::default().link_table(links, total)
}

/// Horizontal space to reserve left of the comments: the largest offset.
pub fn comment_indent(rows: &[Vec<Marker>]) -> u32 {
    rows.iter()
        .flatten()
        .map(|m| m.offset)
        .max()
        .unwrap_or(0)
}
