use super::Node;

/// Pre-order iterator over the nodes of a [`KdTree`](crate::KdTree).
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Nodes<'a> {
    pub(super) fn new(root: Option<&'a Node>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node)
    }
}
