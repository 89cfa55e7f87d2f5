//! Token enumeration over syntax tree nodes.

use crate::lexer::{Span, Token, TokenKind};

/// A node of the concrete syntax tree.
///
/// Every node retains the tokens it consumed, so the tokens of a tree can be
/// enumerated in source order.
pub trait SyntaxNode {
    /// Appends the tokens of this node to `out`, in source order.
    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>);

    /// Returns the tokens of this node in source order.
    fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    /// The character range from the first to the last token of this node.
    fn span(&self) -> Option<Span> {
        let tokens = self.tokens();
        let first = tokens.first()?.span();
        let last = tokens.last()?.span();
        Some(first.merge(last))
    }
}

impl SyntaxNode for Token {
    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        out.push(self);
    }
}

impl<T: SyntaxNode> SyntaxNode for Option<T> {
    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        if let Some(node) = self {
            node.collect_tokens(out);
        }
    }
}

impl<T: SyntaxNode> SyntaxNode for Vec<T> {
    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        for node in self {
            node.collect_tokens(out);
        }
    }
}

impl<T: SyntaxNode> SyntaxNode for Box<T> {
    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        self.as_ref().collect_tokens(out);
    }
}

/// Implements [`SyntaxNode`] for a struct by visiting the listed fields in
/// order. The fields must be listed in source order.
macro_rules! syntax_node {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::ast::SyntaxNode for $ty {
            fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a $crate::lexer::Token>) {
                $( $crate::ast::SyntaxNode::collect_tokens(&self.$field, out); )+
            }
        }
    };
}

pub(crate) use syntax_node;

/// Renders tokens as SQL text, separated by single spaces except around
/// delimiters that conventionally hug their neighbours.
#[must_use]
pub fn render_tokens(tokens: &[&Token]) -> String {
    let mut out = String::new();
    let mut previous: Option<&Token> = None;
    for token in tokens {
        if let Some(previous) = previous {
            let hugs_previous = token.kind() == TokenKind::StatementSeparator
                || token.is_delimiter(',')
                || token.is_delimiter(')')
                || token.is_delimiter('.');
            let hugs_next = previous.is_delimiter('(') || previous.is_delimiter('.');
            if !hugs_previous && !hugs_next {
                out.push(' ');
            }
        }
        out.push_str(token.value());
        previous = Some(token);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, value: &str, offset: usize) -> Token {
        Token::new(kind, value, 1, offset + 1, offset, value.chars().count())
    }

    #[test]
    fn test_option_and_vec_nodes() {
        let a = token(TokenKind::Literal, "a", 0);
        let b = token(TokenKind::Literal, "b", 2);
        let nodes = vec![Some(a.clone()), None, Some(b.clone())];
        assert_eq!(nodes.tokens(), vec![&a, &b]);
        assert_eq!(nodes.span(), Some(Span::new(0, 3)));
        assert_eq!(Option::<Token>::None.span(), None);
    }

    #[test]
    fn test_render_tokens() {
        let tokens = [
            token(TokenKind::Literal, "main", 0),
            token(TokenKind::Delimiter, ".", 4),
            token(TokenKind::Literal, "t", 5),
            token(TokenKind::Delimiter, "(", 7),
            token(TokenKind::Literal, "a", 8),
            token(TokenKind::Delimiter, ",", 9),
            token(TokenKind::Literal, "b", 11),
            token(TokenKind::Delimiter, ")", 12),
            token(TokenKind::StatementSeparator, ";", 13),
        ];
        let refs: Vec<&Token> = tokens.iter().collect();
        assert_eq!(render_tokens(&refs), "main.t (a, b);");
    }
}
