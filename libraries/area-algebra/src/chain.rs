use crate::curve::Curve;
use crate::edge::{Edge, EdgeTag};
use crate::error::AreaError;
use crate::path::PathSegment;

use glam::DVec2;

/// A closed boundary loop of a finished area.
///
/// Consecutive pieces that do not meet are joined by an implied horizontal line,
/// and the loop is closed by a final implied line back to [`Chain::start`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chain {
	pub(crate) start: DVec2,
	pub(crate) curves: Vec<Curve>,
}

impl Chain {
	pub fn start(&self) -> DVec2 {
		self.start
	}

	pub fn curves(&self) -> &[Curve] {
		&self.curves
	}

	/// Whether every junction between pieces, including the closing one, is a horizontal step.
	pub fn is_closed(&self) -> bool {
		let Some(first) = self.curves.first() else { return false };
		let mut last = self.start;
		if first.start() != last {
			return false;
		}
		for curve in &self.curves {
			if curve.start().y != last.y {
				return false;
			}
			last = curve.end();
		}
		last.y == self.start.y
	}

	/// Boundary of the loop as path segments: a move, the pieces with their implied junction lines, and a close.
	pub fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
		let pieces = self
			.curves
			.iter()
			.scan(self.start, |last, curve| {
				let junction = (*last != curve.start()).then(|| PathSegment::LineTo(curve.start()));
				*last = curve.end();
				Some(junction.into_iter().chain(std::iter::once(curve.path_segment())))
			})
			.flatten();
		std::iter::once(PathSegment::MoveTo(self.start)).chain(pieces).chain(std::iter::once(PathSegment::Close))
	}
}

/// A y range of one edge's curve that belongs to the result boundary, linked to the next piece of its chain.
#[derive(Clone, Copy, Debug)]
pub struct CurveLink {
	edge: usize,
	y_top: f64,
	y_bot: f64,
	edge_tag: EdgeTag,
	next: Option<usize>,
}

impl CurveLink {
	/// Extend this link over `other` if both cover touching or overlapping ranges of the same curve with the same tag.
	fn absorb(&mut self, edges: &[Edge], other: &CurveLink) -> Result<bool, AreaError> {
		if self.edge != other.edge || self.edge_tag != other.edge_tag || self.y_bot < other.y_top || self.y_top > other.y_bot {
			return Ok(false);
		}
		let y_top = self.y_top.min(other.y_top);
		let y_bot = self.y_bot.max(other.y_bot);
		check_range(&edges[self.edge].curve, y_top, y_bot)?;
		self.y_top = y_top;
		self.y_bot = y_bot;
		Ok(true)
	}

	/// The linked range of the curve, traversed the way the tag dictates.
	fn sub_curve(&self, edges: &[Edge]) -> Curve {
		let curve = &edges[self.edge].curve;
		let direction = self.edge_tag.direction();
		if self.y_top == curve.y_top() && self.y_bot == curve.y_bot() {
			curve.with_direction(direction)
		} else {
			curve.sub_curve(self.y_top, self.y_bot, direction)
		}
	}
}

fn check_range(curve: &Curve, y_top: f64, y_bot: f64) -> Result<(), AreaError> {
	if y_top < curve.y_top() || y_bot > curve.y_bot() {
		return Err(AreaError::CurveLinkOutOfRange {
			y_top,
			y_bot,
			curve_top: curve.y_top(),
			curve_bot: curve.y_bot(),
		});
	}
	Ok(())
}

/// One open end of a partially built boundary loop.
/// `Enter` ends grow downward at their tail, `Exit` ends grow upward at their head.
#[derive(Clone, Copy, Debug)]
pub struct ChainEnd {
	head: usize,
	tail: usize,
	partner: Option<usize>,
	edge_tag: EdgeTag,
}

/// Storage for the links and chain ends of one sweep, addressed by index.
#[derive(Clone, Debug, Default)]
pub struct ChainArena {
	links: Vec<CurveLink>,
	ends: Vec<ChainEnd>,
}

impl ChainArena {
	pub fn new_link(&mut self, edges: &[Edge], edge: usize, y_top: f64, y_bot: f64, edge_tag: EdgeTag) -> Result<usize, AreaError> {
		check_range(&edges[edge].curve, y_top, y_bot)?;
		self.links.push(CurveLink {
			edge,
			y_top,
			y_bot,
			edge_tag,
			next: None,
		});
		Ok(self.links.len() - 1)
	}

	/// Start a chain end at `link`, taking its polarity from the link.
	pub fn new_end(&mut self, link: usize, partner: Option<usize>) -> usize {
		self.ends.push(ChainEnd {
			head: link,
			tail: link,
			partner,
			edge_tag: self.links[link].edge_tag,
		});
		self.ends.len() - 1
	}

	pub fn set_partner(&mut self, end: usize, partner: usize) {
		self.ends[end].partner = Some(partner);
	}

	pub fn edge_tag(&self, end: usize) -> EdgeTag {
		self.ends[end].edge_tag
	}

	pub fn link_edge_tag(&self, link: usize) -> EdgeTag {
		self.links[link].edge_tag
	}

	/// Horizontal position where the chain end currently stops, at the bottom of its growing link.
	pub fn end_x(&self, edges: &[Edge], end: usize) -> f64 {
		let end = &self.ends[end];
		let link = match end.edge_tag {
			EdgeTag::Enter => &self.links[end.tail],
			_ => &self.links[end.head],
		};
		edges[link.edge].curve.x_at_y(link.y_bot)
	}

	/// Horizontal position where a link starts, at its top.
	pub fn link_x(&self, edges: &[Edge], link: usize) -> f64 {
		let link = &self.links[link];
		edges[link.edge].curve.x_at_y(link.y_top)
	}

	/// Extend the chain end with a new link continuing it downward.
	pub fn add_link(&mut self, end: usize, link: usize) {
		let ChainEnd { head, tail, edge_tag, .. } = self.ends[end];
		if edge_tag == EdgeTag::Enter {
			self.links[tail].next = Some(link);
			self.ends[end].tail = link;
		} else {
			self.links[link].next = Some(head);
			self.ends[end].head = link;
		}
	}

	fn partner_of(&self, end: usize) -> Result<usize, AreaError> {
		self.ends[end].partner.ok_or(AreaError::MissingPartner)
	}

	/// Join two open ends of opposite polarity. Both ends are consumed.
	///
	/// If they are partners the loop closes and the index of its first link is returned.
	/// Otherwise the two partial chains are spliced into one whose remaining ends become partners.
	pub fn link_to(&mut self, this: usize, that: usize) -> Result<Option<usize>, AreaError> {
		let (this_tag, that_tag) = (self.ends[this].edge_tag, self.ends[that].edge_tag);
		if this_tag == EdgeTag::Ignore || that_tag == EdgeTag::Ignore {
			return Err(AreaError::ChainEndRelinked);
		}
		if this_tag == that_tag {
			return Err(AreaError::SamePolarityLink);
		}
		let (enter, exit) = if this_tag == EdgeTag::Enter { (this, that) } else { (that, this) };
		self.ends[this].edge_tag = EdgeTag::Ignore;
		self.ends[that].edge_tag = EdgeTag::Ignore;

		let enter_tail = self.ends[enter].tail;
		self.links[enter_tail].next = Some(self.ends[exit].head);
		self.ends[enter].tail = self.ends[exit].tail;
		if self.ends[this].partner == Some(that) {
			return Ok(Some(self.ends[enter].head));
		}

		let other_enter = self.partner_of(exit)?;
		let other_exit = self.partner_of(enter)?;
		self.ends[other_enter].partner = Some(other_exit);
		self.ends[other_exit].partner = Some(other_enter);

		let ChainEnd { head, tail, .. } = self.ends[enter];
		let other_head = self.ends[other_enter].head;
		if self.links[head].y_top < self.links[other_head].y_top {
			self.links[tail].next = Some(other_head);
			self.ends[other_enter].head = head;
		} else {
			let other_tail = self.ends[other_exit].tail;
			self.links[other_tail].next = Some(head);
			self.ends[other_exit].tail = tail;
		}
		Ok(None)
	}

	/// Number of chain ends that were never joined.
	pub fn open_ends(&self) -> usize {
		self.ends.iter().filter(|end| end.edge_tag != EdgeTag::Ignore).count()
	}

	/// Walk a closed loop from its first link, merging consecutive links over the same curve.
	pub fn collect_chain(&self, edges: &[Edge], head: usize) -> Result<Chain, AreaError> {
		let first = self.links[head];
		let mut curves = Vec::new();
		let mut current = first;
		let mut next = first.next;
		let mut steps = 0;
		while let Some(index) = next {
			steps += 1;
			if steps > self.links.len() {
				return Err(AreaError::CyclicChain);
			}
			let link = &self.links[index];
			if !current.absorb(edges, link)? {
				curves.push(current.sub_curve(edges));
				current = *link;
			}
			next = link.next;
		}
		curves.push(current.sub_curve(edges));
		// The top x of a split piece can differ from `x_at_y` in the last bit
		let start = curves[0].start();
		Ok(Chain { start, curves })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::curve::Direction;
	use crate::edge::CurveTag;

	fn edges() -> Vec<Edge> {
		let line = |x: f64| Edge::new(Curve::line(DVec2::new(x, 0.), DVec2::new(x, 10.), Direction::Increasing), CurveTag::Left);
		vec![line(0.), line(10.)]
	}

	#[test]
	fn partners_close_into_a_loop() {
		let edges = edges();
		let mut arena = ChainArena::default();
		let enter_link = arena.new_link(&edges, 0, 0., 10., EdgeTag::Enter).unwrap();
		let exit_link = arena.new_link(&edges, 1, 0., 10., EdgeTag::Exit).unwrap();
		let open = arena.new_end(enter_link, None);
		let close = arena.new_end(exit_link, Some(open));
		arena.set_partner(open, close);
		assert_eq!(arena.end_x(&edges, open), 0.);
		assert_eq!(arena.end_x(&edges, close), 10.);

		let head = arena.link_to(close, open).unwrap();
		assert_eq!(head, Some(enter_link));
		assert_eq!(arena.open_ends(), 0);
		assert_eq!(arena.link_to(open, close), Err(AreaError::ChainEndRelinked));

		let chain = arena.collect_chain(&edges, enter_link).unwrap();
		assert!(chain.is_closed());
		assert_eq!(chain.start(), DVec2::new(0., 0.));
		assert_eq!(chain.curves().len(), 2);
		assert_eq!(chain.curves()[1].direction(), Direction::Decreasing);
		let segments: Vec<_> = chain.segments().collect();
		assert_eq!(
			segments,
			vec![
				PathSegment::MoveTo(DVec2::new(0., 0.)),
				PathSegment::LineTo(DVec2::new(0., 10.)),
				PathSegment::LineTo(DVec2::new(10., 10.)),
				PathSegment::LineTo(DVec2::new(10., 0.)),
				PathSegment::Close,
			]
		);
	}

	#[test]
	fn same_polarity_is_rejected() {
		let edges = edges();
		let mut arena = ChainArena::default();
		let a = arena.new_link(&edges, 0, 0., 5., EdgeTag::Enter).unwrap();
		let b = arena.new_link(&edges, 1, 0., 5., EdgeTag::Enter).unwrap();
		let (a, b) = (arena.new_end(a, None), arena.new_end(b, None));
		assert_eq!(arena.link_to(a, b), Err(AreaError::SamePolarityLink));
	}

	#[test]
	fn links_outside_curve_are_rejected() {
		let edges = edges();
		let mut arena = ChainArena::default();
		assert!(matches!(arena.new_link(&edges, 0, -1., 5., EdgeTag::Enter), Err(AreaError::CurveLinkOutOfRange { .. })));
	}

	#[test]
	fn consecutive_links_are_absorbed() {
		let edges = edges();
		let mut arena = ChainArena::default();
		let upper = arena.new_link(&edges, 0, 0., 4., EdgeTag::Enter).unwrap();
		let lower = arena.new_link(&edges, 0, 4., 10., EdgeTag::Enter).unwrap();
		let exit = arena.new_link(&edges, 1, 0., 10., EdgeTag::Exit).unwrap();
		let open = arena.new_end(upper, None);
		let close = arena.new_end(exit, Some(open));
		arena.set_partner(open, close);
		arena.add_link(open, lower);
		assert_eq!(arena.end_x(&edges, open), 0.);

		let head = arena.link_to(open, close).unwrap().unwrap();
		let chain = arena.collect_chain(&edges, head).unwrap();
		assert_eq!(chain.curves().len(), 2);
		assert_eq!(chain.curves()[0], edges[0].curve);
	}

	#[test]
	fn loop_starts_on_its_first_split_piece() {
		let arc = Curve::cubic(DVec2::new(50.56, 0.), DVec2::new(37.3, 2.9), DVec2::new(24.2, 5.5), DVec2::new(24.225, 13.7), Direction::Increasing);
		let side = Curve::line(DVec2::new(80., 0.), DVec2::new(80., 13.7), Direction::Increasing);
		let edges = vec![Edge::new(arc, CurveTag::Left), Edge::new(side, CurveTag::Left)];
		let mut arena = ChainArena::default();
		let enter_link = arena.new_link(&edges, 0, 1.3146, 9.71, EdgeTag::Enter).unwrap();
		let exit_link = arena.new_link(&edges, 1, 1.3146, 9.71, EdgeTag::Exit).unwrap();
		let open = arena.new_end(enter_link, None);
		let close = arena.new_end(exit_link, Some(open));
		arena.set_partner(open, close);
		let head = arena.link_to(close, open).unwrap().unwrap();

		let chain = arena.collect_chain(&edges, head).unwrap();
		assert!(chain.is_closed());
		assert_eq!(chain.start(), chain.curves()[0].start());
		let segments: Vec<_> = chain.segments().take(2).collect();
		assert!(matches!(segments[..], [PathSegment::MoveTo(_), PathSegment::CubicTo(..)]), "{segments:?}");
	}
}
