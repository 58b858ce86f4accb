//! Axial container - arranges children along one axis
//!
//! Unifies the row and column layouts. Two main-axis sizing policies:
//!
//! - [`MainAxisSize::Even`]: the available main-axis space (minus the gaps)
//!   is divided equally among the children, rounding per the context's
//!   overflow policy. Every child is offered the same allocation.
//! - [`MainAxisSize::Min`]: each child in list order is offered whatever
//!   main-axis space remains and consumes exactly its reported extent plus
//!   the gap. Earlier children claim space greedily, so reordering children
//!   changes the result.
//!
//! Placement walks children in order, advancing by each child's consumed
//! extent plus spacing. Cross-axis offers are always the full cross space.

use log::trace;

use crate::context::UiContext;
use crate::error::LayoutError;
use crate::geometry::{Axis, Point, Size};
use crate::widget::{adopt, Widget, WidgetCore};

/// How an axial container allots main-axis space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MainAxisSize {
    /// Offer each child the remaining space; consume what it reports.
    Min,
    /// Divide the space equally among children.
    #[default]
    Even,
}

/// Multi-child container arranging children along a configurable axis.
pub struct Axial {
    core: WidgetCore,
    children: Vec<Box<dyn Widget>>,
    axis: Axis,
    spacing: i32,
    policy: MainAxisSize,
    /// Main-axis extent consumed by each child in the last measure pass;
    /// placement advances by these.
    allocations: Vec<i32>,
}

impl Axial {
    pub fn new(axis: Axis, mut children: Vec<Box<dyn Widget>>) -> Result<Self, LayoutError> {
        let core = WidgetCore::new();
        adopt(core.id(), &mut children)?;
        Ok(Self {
            core,
            children,
            axis,
            spacing: 0,
            policy: MainAxisSize::default(),
            allocations: Vec::new(),
        })
    }

    /// A horizontal container (the classic row).
    pub fn row(children: Vec<Box<dyn Widget>>) -> Result<Self, LayoutError> {
        Self::new(Axis::Horizontal, children)
    }

    /// A vertical container (the classic column).
    pub fn column(children: Vec<Box<dyn Widget>>) -> Result<Self, LayoutError> {
        Self::new(Axis::Vertical, children)
    }

    /// Build a row from a data sequence, one child per element.
    pub fn build_row<T>(
        values: impl IntoIterator<Item = T>,
        mut factory: impl FnMut(usize, T) -> Box<dyn Widget>,
    ) -> Result<Self, LayoutError> {
        Self::row(
            values
                .into_iter()
                .enumerate()
                .map(|(index, value)| factory(index, value))
                .collect(),
        )
    }

    /// Build a column from a data sequence, one child per element.
    pub fn build_column<T>(
        values: impl IntoIterator<Item = T>,
        mut factory: impl FnMut(usize, T) -> Box<dyn Widget>,
    ) -> Result<Self, LayoutError> {
        Self::column(
            values
                .into_iter()
                .enumerate()
                .map(|(index, value)| factory(index, value))
                .collect(),
        )
    }

    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_main_axis_size(mut self, policy: MainAxisSize) -> Self {
        self.policy = policy;
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }
}

impl Widget for Axial {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.children
    }

    fn measure(&mut self, max: Size, ctx: &UiContext) -> Size {
        self.allocations.clear();

        // Zero children would divide by zero below; treat as an empty
        // allocation and skip the pass.
        if self.children.is_empty() {
            return Size::ZERO;
        }

        let count = self.children.len() as i32;
        let gaps = self.spacing * (count - 1);
        let cross_avail = self.axis.cross(max);
        let mut cross_used = 0;

        match self.policy {
            MainAxisSize::Even => {
                let share = ctx.divide((self.axis.main(max) - gaps).max(0), count);
                trace!(
                    "axial even split: {} children, share {share} along {:?}",
                    self.children.len(),
                    self.axis
                );
                for child in &mut self.children {
                    let reported = child.calculate_size(self.axis.pack(share, cross_avail), ctx);
                    cross_used = cross_used.max(self.axis.cross(reported));
                    self.allocations.push(share);
                }
            }
            MainAxisSize::Min => {
                let mut remaining = self.axis.main(max);
                for child in &mut self.children {
                    let reported =
                        child.calculate_size(self.axis.pack(remaining.max(0), cross_avail), ctx);
                    let consumed = self.axis.main(reported);
                    remaining -= consumed + self.spacing;
                    cross_used = cross_used.max(self.axis.cross(reported));
                    self.allocations.push(consumed);
                }
            }
        }

        // Own main extent is the union of child extents: allocations plus
        // the gaps between them, without a trailing gap.
        let main_used: i32 = self.allocations.iter().sum::<i32>() + gaps;
        self.axis.pack(main_used, cross_used)
    }

    fn place(&mut self, origin: Point, ctx: &UiContext) {
        let mut offset = 0;
        for (child, allocation) in self.children.iter_mut().zip(&self.allocations) {
            child.set_placement(self.axis.advance(origin, offset), ctx);
            offset += allocation + self.spacing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::OverflowPolicy;
    use crate::geometry::Rect;
    use crate::widget::testing::Probe;

    fn probes(count: usize) -> (Vec<Box<dyn Widget>>, Vec<std::rc::Rc<std::cell::RefCell<crate::widget::testing::ProbeLog>>>) {
        let mut children: Vec<Box<dyn Widget>> = Vec::new();
        let mut logs = Vec::new();
        for _ in 0..count {
            let probe = Probe::greedy();
            logs.push(probe.log_handle());
            children.push(Box::new(probe));
        }
        (children, logs)
    }

    #[test]
    fn test_even_split_rounds_down() {
        // 100 across 3 children, no spacing: each offered 33.
        let ctx = UiContext::default();
        let (children, logs) = probes(3);
        let mut row = Axial::row(children)
            .unwrap()
            .with_rect(Rect::new(0, 0, 100, 40));

        row.update(&ctx);

        for log in &logs {
            assert_eq!(log.borrow().offers, vec![Size::new(33, 40)]);
        }
        assert_eq!(row.core().rect().size(), Size::new(99, 40));
    }

    #[test]
    fn test_even_split_rounds_up() {
        let ctx = UiContext::default();
        ctx.set_overflow_policy(OverflowPolicy::RoundUp);
        let (children, logs) = probes(3);
        let mut row = Axial::row(children)
            .unwrap()
            .with_rect(Rect::new(0, 0, 100, 40));

        row.update(&ctx);

        for log in &logs {
            assert_eq!(log.borrow().offers, vec![Size::new(34, 40)]);
        }
    }

    #[test]
    fn test_even_split_subtracts_spacing_and_places_with_gaps() {
        // 100 wide, spacing 2, 3 children: 96 to divide, 32 each, children
        // at x = 0, 34, 68, own width 96 + 4 gaps = 100.
        let ctx = UiContext::default();
        let (children, logs) = probes(3);
        let mut row = Axial::row(children)
            .unwrap()
            .with_spacing(2)
            .with_rect(Rect::new(0, 0, 100, 40));

        row.update(&ctx);

        let xs: Vec<i32> = logs
            .iter()
            .map(|log| log.borrow().placements[0].x)
            .collect();
        assert_eq!(xs, vec![0, 34, 68]);
        assert_eq!(row.core().rect().size(), Size::new(100, 40));
    }

    #[test]
    fn test_min_split_offers_remaining_space() {
        // Column of height 100: child A has natural height 30, child B is
        // greedy. B must be offered the remaining 70, not an even 50.
        let ctx = UiContext::default();
        let first = Probe::fixed_height(30);
        let first_log = first.log_handle();
        let second = Probe::greedy();
        let second_log = second.log_handle();

        let mut column = Axial::column(vec![Box::new(first), Box::new(second)])
            .unwrap()
            .with_main_axis_size(MainAxisSize::Min)
            .with_rect(Rect::new(0, 0, 50, 100));
        column.update(&ctx);

        assert_eq!(first_log.borrow().offers, vec![Size::new(50, 100)]);
        assert_eq!(second_log.borrow().offers, vec![Size::new(50, 70)]);
        assert_eq!(first_log.borrow().placements, vec![Point::new(0, 0)]);
        assert_eq!(second_log.borrow().placements, vec![Point::new(0, 30)]);
        assert_eq!(column.core().rect().size(), Size::new(50, 100));
    }

    #[test]
    fn test_min_split_is_order_dependent() {
        // Same children, reversed: the greedy child now swallows the whole
        // offer and the fixed child is left with nothing.
        let ctx = UiContext::default();
        let greedy = Probe::greedy();
        let greedy_log = greedy.log_handle();
        let fixed = Probe::fixed_height(30);
        let fixed_log = fixed.log_handle();

        let mut column = Axial::column(vec![Box::new(greedy), Box::new(fixed)])
            .unwrap()
            .with_main_axis_size(MainAxisSize::Min)
            .with_rect(Rect::new(0, 0, 50, 100));
        column.update(&ctx);

        assert_eq!(greedy_log.borrow().offers, vec![Size::new(50, 100)]);
        assert_eq!(fixed_log.borrow().offers, vec![Size::new(50, 0)]);
    }

    #[test]
    fn test_min_split_accounts_for_spacing() {
        let ctx = UiContext::default();
        let first = Probe::fixed_height(30);
        let second = Probe::greedy();
        let second_log = second.log_handle();

        let mut column = Axial::column(vec![Box::new(first), Box::new(second)])
            .unwrap()
            .with_main_axis_size(MainAxisSize::Min)
            .with_spacing(5)
            .with_rect(Rect::new(0, 0, 50, 100));
        column.update(&ctx);

        assert_eq!(second_log.borrow().offers, vec![Size::new(50, 65)]);
        assert_eq!(second_log.borrow().placements, vec![Point::new(0, 35)]);
    }

    #[test]
    fn test_zero_children_is_empty_allocation() {
        let ctx = UiContext::default();
        let mut row = Axial::row(Vec::new())
            .unwrap()
            .with_rect(Rect::new(0, 0, 100, 100));
        let mut column = Axial::column(Vec::new())
            .unwrap()
            .with_main_axis_size(MainAxisSize::Min)
            .with_rect(Rect::new(0, 0, 100, 100));

        row.update(&ctx);
        column.update(&ctx);

        assert_eq!(row.core().rect().size(), Size::ZERO);
        assert_eq!(column.core().rect().size(), Size::ZERO);
    }

    #[test]
    fn test_build_factory_preserves_order() {
        let ctx = UiContext::default();
        let labels = ["a", "b", "c"];
        let mut logs = Vec::new();
        let mut row = Axial::build_row(labels, |_, _| {
            let probe = Probe::greedy();
            logs.push(probe.log_handle());
            Box::new(probe)
        })
        .unwrap()
        .with_rect(Rect::new(0, 0, 90, 30));

        row.update(&ctx);

        let xs: Vec<i32> = logs
            .iter()
            .map(|log| log.borrow().placements[0].x)
            .collect();
        assert_eq!(xs, vec![0, 30, 60]);
    }
}
