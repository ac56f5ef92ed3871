use crate::chain::{Chain, ChainArena};
use crate::curve::Curve;
use crate::edge::{CurveTag, Edge, EdgeTag, compare_edges};
use crate::error::AreaError;

use std::cmp::Ordering;

/// Rule deciding from the winding counts of both operands whether a point belongs to the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
	Union,
	Intersection,
	Difference,
	ExclusiveOr,
	/// Normalization of a single path under the non-zero winding rule.
	NonZero,
	/// Normalization of a single path under the even-odd rule.
	EvenOdd,
}

impl Operator {
	fn contains(self, left: i32, right: i32) -> bool {
		let (in_left, in_right) = (left != 0, right != 0);
		match self {
			Operator::Union => in_left || in_right,
			Operator::Intersection => in_left && in_right,
			Operator::Difference => in_left && !in_right,
			Operator::ExclusiveOr => in_left != in_right,
			Operator::NonZero => in_left,
			Operator::EvenOdd => left % 2 != 0,
		}
	}
}

/// Running winding counts of both operands along one sweep row, read from left to right.
#[derive(Clone, Copy, Debug)]
struct Classifier {
	operator: Operator,
	left: i32,
	right: i32,
	inside: bool,
}

impl Classifier {
	fn new(operator: Operator) -> Self {
		Classifier {
			operator,
			left: 0,
			right: 0,
			inside: false,
		}
	}

	fn new_row(&mut self) {
		*self = Classifier::new(self.operator);
	}

	/// Account for crossing `edge` and report whether that moved the scan into or out of the result.
	fn classify(&mut self, edge: &Edge) -> EdgeTag {
		let winding = edge.curve.direction().sign();
		match edge.curve_tag {
			CurveTag::Left => self.left += winding,
			CurveTag::Right => self.right += winding,
		}
		let inside = self.operator.contains(self.left, self.right);
		if inside == self.inside {
			return EdgeTag::Ignore;
		}
		self.inside = inside;
		if inside { EdgeTag::Enter } else { EdgeTag::Exit }
	}
}

fn top_order(a: &Curve, b: &Curve) -> Ordering {
	a.y_top().total_cmp(&b.y_top()).then_with(|| a.x_top().total_cmp(&b.x_top()))
}

/// Run the sweep over the curves of both operands and return the closed boundary loops of the result.
pub fn calculate(left: &[Curve], right: &[Curve], operator: Operator) -> Result<Vec<Chain>, AreaError> {
	let mut edges: Vec<Edge> = left.iter().map(|curve| Edge::new(*curve, CurveTag::Left)).chain(right.iter().map(|curve| Edge::new(*curve, CurveTag::Right))).collect();
	log::debug!("{operator:?} sweep over {} left and {} right curves", left.len(), right.len());
	if edges.len() < 2 {
		return Ok(Vec::new());
	}
	Sweep::new(operator).run(&mut edges)
}

/// State of one sweep: the arena of boundary links, the open chain ends of the previous row, and the closed loops.
struct Sweep {
	classifier: Classifier,
	arena: ChainArena,
	chains: Vec<usize>,
	closed: Vec<usize>,
}

impl Sweep {
	fn new(operator: Operator) -> Self {
		Sweep {
			classifier: Classifier::new(operator),
			arena: ChainArena::default(),
			chains: Vec::new(),
			closed: Vec::new(),
		}
	}

	fn run(mut self, edges: &mut [Edge]) -> Result<Vec<Chain>, AreaError> {
		let edge_count = edges.len();
		// Stable, so edges sharing a top point keep their input order
		let mut order: Vec<usize> = (0..edge_count).collect();
		order.sort_by(|&a, &b| top_order(&edges[a].curve, &edges[b].curve));

		// `order[left..right]` are the active edges, sorted left to right at the top of the current row
		let (mut left, mut right) = (0, 0);
		let mut y_range = [f64::NEG_INFINITY; 2];
		while left < edge_count {
			let mut y = y_range[0];

			// Drop edges ending at or above the current height, keeping the others in order at the right end
			let mut write = right;
			for read in (left..right).rev() {
				let index = order[read];
				if edges[index].curve.y_bot() > y {
					write -= 1;
					order[write] = index;
				}
			}
			left = write;

			if left >= right {
				if right >= edge_count {
					break;
				}
				y = edges[order[right]].curve.y_top();
				if y > y_range[0] {
					self.finalize_sub_curves()?;
				}
				y_range[0] = y;
			}
			while right < edge_count && edges[order[right]].curve.y_top() <= y {
				right += 1;
			}
			y_range[1] = edges[order[left]].curve.y_bot();
			if right < edge_count {
				y_range[1] = y_range[1].min(edges[order[right]].curve.y_top());
			}

			Self::sort_row(edges, &mut order[left..right], &mut y_range)?;
			let links = self.classify_row(edges, &order[left..right], y_range)?;
			log::trace!("Row [{}, {}]: {} active edges, {} boundary links", y_range[0], y_range[1], right - left, links.len());
			self.resolve_links(edges, &links)?;
			y_range[0] = y_range[1];
		}
		self.finalize_sub_curves()?;

		let open = self.arena.open_ends();
		if open > 0 {
			return Err(AreaError::UnresolvedChains(open));
		}
		log::debug!("Sweep produced {} closed chains", self.closed.len());
		self.closed.iter().map(|&head| self.arena.collect_chain(edges, head)).collect()
	}

	/// Insertion sort the active edges by their horizontal order in the band, narrowing the band to where that
	/// order is constant, and group edges that coincide into equivalence classes.
	fn sort_row(edges: &mut [Edge], active: &mut [usize], y_range: &mut [f64; 2]) -> Result<(), AreaError> {
		let mut next_equivalence = 1;
		for current in 0..active.len() {
			let index = active[current];
			edges[index].equivalence = 0;
			let mut slot = current;
			while slot > 0 {
				let previous = active[slot - 1];
				let ordering = compare_edges(edges, index, previous, y_range)?;
				if y_range[1] <= y_range[0] {
					return Err(AreaError::Backstepping { from: y_range[0], to: y_range[1] });
				}
				if ordering != Ordering::Less {
					if ordering == Ordering::Equal {
						let mut equivalence = edges[previous].equivalence;
						if equivalence == 0 {
							equivalence = next_equivalence;
							next_equivalence += 1;
							edges[previous].equivalence = equivalence;
						}
						edges[index].equivalence = equivalence;
					}
					break;
				}
				active[slot] = previous;
				slot -= 1;
			}
			active[slot] = index;
		}
		Ok(())
	}

	/// Walk the sorted row left to right and emit a boundary link for every edge (or class of coincident edges)
	/// where the scan enters or leaves the result.
	fn classify_row(&mut self, edges: &mut [Edge], active: &[usize], [y_start, y_end]: [f64; 2]) -> Result<Vec<usize>, AreaError> {
		self.classifier.new_row();
		let mut links = Vec::new();
		let mut current = 0;
		while current < active.len() {
			let mut index = active[current];
			let equivalence = edges[index].equivalence;
			let edge_tag = if equivalence == 0 {
				current += 1;
				self.classifier.classify(&edges[index])
			} else {
				// Coincident edges are crossed together; at most one of them carries the boundary
				let was_inside = self.classifier.inside;
				let wanted = if was_inside { EdgeTag::Exit } else { EdgeTag::Enter };
				let mut active_match = None;
				let mut longest_match = index;
				let mut furthest_y = y_end;
				loop {
					self.classifier.classify(&edges[index]);
					if active_match.is_none() && edges[index].is_active_for(y_start, wanted) {
						active_match = Some(index);
					}
					let y_bot = edges[index].curve.y_bot();
					if y_bot > furthest_y {
						longest_match = index;
						furthest_y = y_bot;
					}
					current += 1;
					if current >= active.len() {
						break;
					}
					index = active[current];
					if edges[index].equivalence != equivalence {
						break;
					}
				}
				if self.classifier.inside == was_inside {
					EdgeTag::Ignore
				} else {
					index = active_match.unwrap_or(longest_match);
					wanted
				}
			};
			if edge_tag != EdgeTag::Ignore {
				edges[index].record(y_end, edge_tag);
				links.push(self.arena.new_link(edges, index, y_start, y_end, edge_tag)?);
			}
		}
		if self.classifier.inside {
			log::warn!("Sweep row [{y_start}, {y_end}] ended inside the result");
		}
		Ok(links)
	}

	/// Join the open chain ends of the previous row, in left to right order, pairwise.
	fn finalize_sub_curves(&mut self) -> Result<(), AreaError> {
		if self.chains.is_empty() {
			return Ok(());
		}
		if self.chains.len() % 2 != 0 {
			return Err(AreaError::OddChainCount(self.chains.len()));
		}
		for pair in std::mem::take(&mut self.chains).chunks_exact(2) {
			if let Some(head) = self.arena.link_to(pair[0], pair[1])? {
				self.closed.push(head);
			}
		}
		Ok(())
	}

	/// Connect the open chain ends of the previous row with the new boundary links of this row.
	///
	/// Both lists are ordered left to right. At each step the leftmost chain end and link are either
	/// joined to each other, or the chain end is joined to the next chain end (the boundary turns back up),
	/// or the link is paired with the next link to open a new chain (the boundary turns back down).
	fn resolve_links(&mut self, edges: &[Edge], links: &[usize]) -> Result<(), AreaError> {
		if links.len() % 2 != 0 {
			return Err(AreaError::OddLinkCount(links.len()));
		}
		if self.chains.len() % 2 != 0 {
			return Err(AreaError::OddChainCount(self.chains.len()));
		}
		let ends = std::mem::take(&mut self.chains);
		let end_at = |index: usize| ends.get(index).copied();
		let link_at = |index: usize| links.get(index).copied();

		let (mut chain_index, mut link_index) = (0, 0);
		let (mut chain, mut next_chain) = (end_at(0), end_at(1));
		let (mut link, mut next_link) = (link_at(0), link_at(1));
		while chain.is_some() || link.is_some() {
			let mut connect_chains = link.is_none();
			let mut connect_links = chain.is_none();
			if let (Some(chain), Some(link)) = (chain, link) {
				let chain_x = self.arena.end_x(edges, chain);
				let link_x = self.arena.link_x(edges, link);
				// Chain ends or links meeting at the same x close up on themselves
				connect_chains = chain_index % 2 == 0 && next_chain.is_some_and(|next| self.arena.end_x(edges, next) == chain_x);
				connect_links = link_index % 2 == 0 && next_link.is_some_and(|next| self.arena.link_x(edges, next) == link_x);
				if !connect_chains && !connect_links {
					// Otherwise whichever side has its pair entirely before the other side's next position connects
					connect_chains = chain_x < link_x && next_chain.is_some_and(|next| obstructs(self.arena.end_x(edges, next), link_x, chain_index));
					connect_links = link_x < chain_x && next_link.is_some_and(|next| obstructs(self.arena.link_x(edges, next), chain_x, link_index));
				}
			}

			if connect_chains {
				let (Some(first), Some(second)) = (chain, next_chain) else {
					return Err(AreaError::OddChainCount(ends.len()));
				};
				if let Some(head) = self.arena.link_to(first, second)? {
					self.closed.push(head);
				}
				chain_index += 2;
				chain = end_at(chain_index);
				next_chain = end_at(chain_index + 1);
			}
			if connect_links {
				let (Some(first), Some(second)) = (link, next_link) else {
					return Err(AreaError::OddLinkCount(links.len()));
				};
				let open = self.arena.new_end(first, None);
				let close = self.arena.new_end(second, Some(open));
				self.arena.set_partner(open, close);
				self.chains.push(open);
				self.chains.push(close);
				link_index += 2;
				link = link_at(link_index);
				next_link = link_at(link_index + 1);
			}
			if !connect_chains && !connect_links {
				let (Some(end), Some(continuation)) = (chain, link) else {
					return Err(AreaError::UnresolvedChains(ends.len()));
				};
				if self.arena.edge_tag(end) != self.arena.link_edge_tag(continuation) {
					return Err(AreaError::PolarityMismatch);
				}
				self.arena.add_link(end, continuation);
				self.chains.push(end);
				chain_index += 1;
				chain = next_chain;
				next_chain = end_at(chain_index + 1);
				link_index += 1;
				link = next_link;
				next_link = link_at(link_index + 1);
			}
		}
		if self.chains.len() % 2 != 0 {
			return Err(AreaError::OddChainCount(self.chains.len()));
		}
		Ok(())
	}
}

/// Whether `v1` lies before `v2`. Ties count as before on even phases so that
/// shapes touching at a single point stay separate (4-connectivity) instead of merging.
fn obstructs(v1: f64, v2: f64, phase: usize) -> bool {
	if phase % 2 == 0 { v1 <= v2 } else { v1 < v2 }
}
