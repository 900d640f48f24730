/// The walk's memory of where it is in the tree.
///
/// Tracks the current path-segment sequence, its parent, and an ancestor
/// stack indexed by depth. The stack grows without a fixed ceiling; popping
/// K levels restores exactly the ancestor sequence that was current before
/// descending those K levels, even when the walk re-ascends several levels
/// in a single transition.
#[derive(Debug, Default)]
pub(crate) struct Context {
    parent: Vec<String>,
    current: Vec<String>,
    stack: Vec<Vec<String>>,
}

impl Context {
    /// Records the transition to the next visited entry's segments.
    ///
    /// Depth is the segment count: an equal count is a sibling step, a
    /// greater count descends one level, a smaller count re-ascends by the
    /// difference.
    pub(crate) fn advance(&mut self, next: &[String]) {
        let old_depth = self.current.len();
        let new_depth = next.len();

        if new_depth > old_depth {
            let grandparent = std::mem::take(&mut self.parent);
            self.stack.push(grandparent);
            self.parent = std::mem::take(&mut self.current);
        } else if new_depth < old_depth {
            for _ in 0..(old_depth - new_depth) {
                // The walk can only have reached old_depth by pushing one
                // frame per level, so the frames being popped here exist.
                if let Some(ancestor) = self.stack.pop() {
                    self.parent = ancestor;
                }
            }
        }

        self.current = next.to_vec();
    }

    #[cfg(test)]
    pub(crate) fn current(&self) -> &[String] {
        &self.current
    }

    #[cfg(test)]
    pub(crate) fn parent(&self) -> &[String] {
        &self.parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| (*p).to_owned()).collect()
    }

    #[test]
    fn sibling_steps_leave_the_ancestry_untouched() {
        let mut ctx = Context::default();
        ctx.advance(&seg(&["a"]));
        ctx.advance(&seg(&["a", "x"]));
        ctx.advance(&seg(&["a", "y"]));
        assert_eq!(ctx.parent(), seg(&["a"]));
        assert_eq!(ctx.current(), seg(&["a", "y"]));
    }

    #[test]
    fn multi_level_reascent_pops_all_frames_in_one_transition() {
        let mut ctx = Context::default();
        // Descend to depth 5.
        ctx.advance(&seg(&["a"]));
        ctx.advance(&seg(&["a", "b"]));
        let parent_at_depth_two = ctx.parent().to_vec();
        ctx.advance(&seg(&["a", "b", "c"]));
        ctx.advance(&seg(&["a", "b", "c", "d"]));
        ctx.advance(&seg(&["a", "b", "c", "d", "e"]));

        // Jump straight back to a depth-2 sibling.
        ctx.advance(&seg(&["a", "z"]));
        assert_eq!(ctx.parent(), parent_at_depth_two);
        assert_eq!(ctx.current(), seg(&["a", "z"]));
    }

    #[test]
    fn reascent_to_the_root_level_restores_the_empty_ancestry() {
        let mut ctx = Context::default();
        ctx.advance(&seg(&[]));
        ctx.advance(&seg(&["a"]));
        ctx.advance(&seg(&["a", "b"]));
        ctx.advance(&seg(&["c"]));
        assert!(ctx.parent().is_empty());
        assert_eq!(ctx.current(), seg(&["c"]));
    }
}
