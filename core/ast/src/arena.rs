use crate::nodes::{
    Ast, AstNode, Definition, FunctionDefinition, SelectStatement, SourceFile, Statement,
};
use rustc_hash::FxHashMap;
use std::rc::Rc;

#[derive(Default, Clone)]
pub struct Arena {
    pub(crate) nodes: FxHashMap<u32, AstNode>,
    pub(crate) node_routes: FxHashMap<u32, NodeRoute>,
}

impl Arena {
    #[must_use]
    pub fn source_files(&self) -> Vec<Rc<SourceFile>> {
        let mut files: Vec<Rc<SourceFile>> = self
            .list_nodes_cmp(|node| {
                if let AstNode::Ast(Ast::SourceFile(source_file)) = node {
                    Some(source_file.clone())
                } else {
                    None
                }
            })
            .collect();
        files.sort_by_key(|file| file.id);
        files
    }

    #[must_use]
    pub fn functions(&self) -> Vec<Rc<FunctionDefinition>> {
        let mut functions: Vec<Rc<FunctionDefinition>> = self
            .list_nodes_cmp(|node| {
                if let AstNode::Definition(Definition::Function(func_def)) = node {
                    Some(func_def.clone())
                } else {
                    None
                }
            })
            .collect();
        functions.sort_by_key(|function| function.id);
        functions
    }

    #[must_use]
    pub fn select_statements(&self) -> Vec<Rc<SelectStatement>> {
        let mut selects: Vec<Rc<SelectStatement>> = self
            .list_nodes_cmp(|node| {
                if let AstNode::Statement(Statement::Select(select)) = node {
                    Some(select.clone())
                } else {
                    None
                }
            })
            .collect();
        selects.sort_by_key(|select| select.id);
        selects
    }

    /// Adds a node to the arena and records its parent-child relationship.
    ///
    /// Children are usually built before their parent is added, so the parent
    /// route is created on demand.
    ///
    /// # Panics
    ///
    /// Panics if `node.id()` is zero or if a node with the same ID already exists in the arena.
    pub fn add_node(&mut self, node: AstNode, parent_id: u32) {
        assert!(node.id() != 0, "Node ID must be non-zero");
        assert!(
            !self.nodes.contains_key(&node.id()),
            "Node with ID {} already exists in the arena",
            node.id()
        );
        let id = node.id();
        self.nodes.insert(id, node);
        self.node_routes.entry(id).or_default().parent = Some(parent_id);
        self.node_routes
            .entry(parent_id)
            .or_default()
            .children
            .push(id);
    }

    #[must_use]
    pub fn find_node(&self, id: u32) -> Option<AstNode> {
        self.nodes.get(&id).cloned()
    }

    #[must_use]
    pub fn find_parent_node(&self, id: u32) -> Option<u32> {
        self.node_routes
            .get(&id)
            .and_then(|route| route.parent)
            .filter(|parent| self.nodes.contains_key(parent))
    }

    /// Children of `id` in the order they were added, which is source order.
    #[must_use]
    pub fn children(&self, id: u32) -> Vec<AstNode> {
        self.node_routes
            .get(&id)
            .map(|route| {
                route
                    .children
                    .iter()
                    .filter_map(|child_id| self.nodes.get(child_id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn filter_nodes<T: Fn(&AstNode) -> bool>(&self, fn_predicate: T) -> Vec<AstNode> {
        let mut nodes: Vec<AstNode> = self
            .nodes
            .values()
            .filter(|node| fn_predicate(node))
            .cloned()
            .collect();
        nodes.sort_by_key(AstNode::id);
        nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn list_nodes_cmp<'a, T, F>(&'a self, cmp: F) -> impl Iterator<Item = T> + 'a
    where
        F: Fn(&AstNode) -> Option<T> + 'a,
        T: Clone + 'static,
    {
        self.nodes.values().filter_map(move |node| cmp(node))
    }
}

#[derive(Clone, Default)]
pub struct NodeRoute {
    parent: Option<u32>,
    children: Vec<u32>,
}
