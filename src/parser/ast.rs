// AST (Abstract Syntax Tree) definitions for the C-subset front end

use std::fmt;

/// The closed set of node kinds the parser produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    PreprocessorDirective,
    VariableDeclarationStatement,
    Declarator,
    Initializer,
    FunctionDefinition,
    FunctionPrototype,
    TypeSpecifier,
    Keyword,
    Identifier,
    Constant,
    BlockStatement,
    IfStatement,
    ForStatement,
    ReturnStatement,
    EmptyStatement,
    ExpressionStatement,
    AssignmentExpression,
    BinaryExpression,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Matches the node tags written into rendered trees.
        let name = match self {
            NodeKind::Program => "Program",
            NodeKind::PreprocessorDirective => "PreprocessorDirective",
            NodeKind::VariableDeclarationStatement => "VariableDeclarationStatement",
            NodeKind::Declarator => "Declarator",
            NodeKind::Initializer => "Initializer",
            NodeKind::FunctionDefinition => "FunctionDefinition",
            NodeKind::FunctionPrototype => "FunctionPrototype",
            NodeKind::TypeSpecifier => "TypeSpecifier",
            NodeKind::Keyword => "Keyword",
            NodeKind::Identifier => "Identifier",
            NodeKind::Constant => "Constant",
            NodeKind::BlockStatement => "BlockStatement",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::ForStatement => "ForStatement",
            NodeKind::ReturnStatement => "ReturnStatement",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::AssignmentExpression => "AssignmentExpression",
            NodeKind::BinaryExpression => "BinaryExpression",
        };
        f.write_str(name)
    }
}

/// One AST node.
///
/// A node owns its children outright: dropping a node drops its entire
/// subtree, and no node is ever shared between two parents. Nodes are built
/// bottom-up during parsing and attached to their parent as soon as a grammar
/// rule completes; after attachment the only mutation is appending further
/// children while folding a left-associative chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// The associated lexeme, or empty when the kind carries none.
    pub text: String,
    pub line: usize,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            children: Vec::new(),
        }
    }

    /// Leaf constructor used all over the grammar rules.
    pub fn leaf(kind: NodeKind, text: impl Into<String>, line: usize) -> Self {
        Self::new(kind, text, line)
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Render the tree with box-drawing connectors, one node per row as
    /// `Kind (text) [Line: n]`.
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, "", true);
        out
    }

    fn render_into(&self, out: &mut String, prefix: &str, is_last: bool) {
        out.push_str(prefix);
        out.push_str(if is_last { "└── " } else { "├── " });
        out.push_str(&format!(
            "{} ({}) [Line: {}]\n",
            self.kind, self.text, self.line
        ));

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        for (i, child) in self.children.iter().enumerate() {
            child.render_into(out, &child_prefix, i == self.children.len() - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tree_connectors() {
        let mut root = Node::new(NodeKind::Program, "", 1);
        let mut decl = Node::new(NodeKind::VariableDeclarationStatement, "", 1);
        decl.push(Node::leaf(NodeKind::TypeSpecifier, "int", 1));
        decl.push(Node::leaf(NodeKind::Declarator, "x", 1));
        root.push(decl);

        let rendered = root.render_tree();
        assert!(rendered.starts_with("└── Program () [Line: 1]\n"));
        assert!(rendered.contains("├── TypeSpecifier (int) [Line: 1]"));
        assert!(rendered.contains("└── Declarator (x) [Line: 1]"));
    }
}
