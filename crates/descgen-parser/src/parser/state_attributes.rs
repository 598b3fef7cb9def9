//! Attribute lists, qualified names and attribute argument expressions.

use descgen_common::Span;
use descgen_common::diagnostics::diagnostic_codes;
use descgen_scanner::SyntaxKind;
use smallvec::SmallVec;

use super::ParserState;
use crate::ast::{
    ArgumentName, Attribute, AttributeArgument, AttributeList, BinaryOperator, Expression,
    Identifier, QualifiedName, StringLiteralKind, UnaryOperator,
};

impl ParserState {
    // =========================================================================
    // Attribute Lists
    // =========================================================================

    /// Parse zero or more consecutive `[...]` attribute lists.
    pub(crate) fn parse_attribute_lists(&mut self) -> Vec<AttributeList> {
        let mut lists = Vec::new();
        while self.is_token(SyntaxKind::OpenBracketToken) {
            lists.push(self.parse_attribute_list());
        }
        lists
    }

    fn parse_attribute_list(&mut self) -> AttributeList {
        let start = self.token_start();
        self.next_token();

        let target = if (self.is_token(SyntaxKind::Identifier) || self.token().is_keyword())
            && self.peek_token() == SyntaxKind::ColonToken
        {
            let target = if self.is_token(SyntaxKind::Identifier) {
                self.token_value()
            } else {
                self.token_text()
            };
            self.next_token();
            self.next_token();
            Some(target)
        } else {
            None
        };

        let mut attributes = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            let Some(attribute) = self.parse_attribute() else {
                break;
            };
            attributes.push(attribute);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }

        if !self.parse_expected(SyntaxKind::CloseBracketToken) {
            self.skip_to_attribute_list_end();
        }

        AttributeList {
            target,
            attributes,
            span: Span::new(start, self.previous_token_end.max(start)),
        }
    }

    fn skip_to_attribute_list_end(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::CloseBracketToken if depth == 0 => {
                    self.next_token();
                    return;
                }
                SyntaxKind::OpenBraceToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::SemicolonToken
                    if depth == 0 =>
                {
                    return;
                }
                SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.next_token();
        }
    }

    fn parse_attribute(&mut self) -> Option<Attribute> {
        let start = self.token_start();
        let name = self.parse_qualified_name()?;
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            Some(self.parse_attribute_arguments())
        } else {
            None
        };
        Some(Attribute {
            name,
            arguments,
            span: Span::new(start, self.previous_token_end.max(start)),
        })
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Parse `[alias::]A.B.C`, keeping any generic argument lists in the text.
    pub(crate) fn parse_qualified_name(&mut self) -> Option<QualifiedName> {
        let start = self.token_start();
        let mut text = String::new();
        let first = self.parse_identifier_into(&mut text)?;

        let mut alias = None;
        let mut segments: SmallVec<[Identifier; 2]> = SmallVec::new();
        if self.parse_optional(SyntaxKind::ColonColonToken) {
            text.push_str("::");
            alias = Some(first);
            segments.push(self.parse_identifier_into(&mut text)?);
        } else {
            segments.push(first);
        }

        loop {
            if self.is_token(SyntaxKind::LessThanToken) {
                self.append_type_argument_list(&mut text);
            }
            if !self.parse_optional(SyntaxKind::DotToken) {
                break;
            }
            text.push('.');
            segments.push(self.parse_identifier_into(&mut text)?);
        }

        Some(QualifiedName {
            alias,
            segments,
            text,
            span: Span::new(start, self.previous_token_end.max(start)),
        })
    }

    fn parse_identifier_into(&mut self, text: &mut String) -> Option<Identifier> {
        if self.is_token(SyntaxKind::Identifier) {
            text.push_str(self.scanner.get_token_text());
        }
        self.parse_identifier()
    }

    fn append_type_argument_list(&mut self, text: &mut String) {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CloseBracketToken => return,
                SyntaxKind::LessThanToken => depth += 1,
                SyntaxKind::GreaterThanToken => depth = depth.saturating_sub(1),
                _ => {}
            }
            if self.is_token(SyntaxKind::CommaToken) {
                text.push_str(", ");
            } else {
                text.push_str(self.scanner.get_token_text());
            }
            self.next_token();
            if depth == 0 {
                return;
            }
        }
    }

    // =========================================================================
    // Arguments
    // =========================================================================

    fn parse_attribute_arguments(&mut self) -> Vec<AttributeArgument> {
        self.next_token();
        let mut arguments = Vec::new();
        if self.parse_optional(SyntaxKind::CloseParenToken) {
            return arguments;
        }
        loop {
            arguments.push(self.parse_attribute_argument());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        if !self.parse_expected(SyntaxKind::CloseParenToken) {
            self.skip_argument_tail();
            self.parse_optional(SyntaxKind::CloseParenToken);
        }
        arguments
    }

    fn parse_attribute_argument(&mut self) -> AttributeArgument {
        let start = self.token_start();
        let name = if self.is_token(SyntaxKind::Identifier) {
            match self.peek_token() {
                SyntaxKind::EqualsToken => self.parse_argument_name().map(ArgumentName::Equals),
                SyntaxKind::ColonToken => self.parse_argument_name().map(ArgumentName::Colon),
                _ => None,
            }
        } else {
            None
        };

        let expression_start = self.token_start();
        let mut expression = self.parse_expression();
        if !matches!(
            self.token(),
            SyntaxKind::CommaToken | SyntaxKind::CloseParenToken | SyntaxKind::EndOfFileToken
        ) {
            // Member access, conditionals and the like stay opaque
            self.skip_argument_tail();
            expression = Expression::Other(self.source_slice(expression_start, self.previous_token_end));
        }

        AttributeArgument {
            name,
            expression,
            span: Span::new(start, self.previous_token_end.max(start)),
        }
    }

    /// Consume `name` and the `=` or `:` after it.
    fn parse_argument_name(&mut self) -> Option<Identifier> {
        let identifier = self.parse_identifier();
        self.next_token();
        identifier
    }

    /// Skip to the `,` or `)` that ends the current argument.
    fn skip_argument_tail(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::CommaToken | SyntaxKind::CloseParenToken if depth == 0 => return,
                SyntaxKind::CloseBracketToken | SyntaxKind::SemicolonToken if depth == 0 => return,
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.next_token();
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub(crate) fn parse_expression(&mut self) -> Expression {
        self.parse_binary_expression(0)
    }

    fn parse_binary_expression(&mut self, min_precedence: u8) -> Expression {
        let mut left = self.parse_unary_expression();
        while let Some((operator, precedence)) = binary_operator(self.token()) {
            if precedence <= min_precedence {
                break;
            }
            self.next_token();
            let right = self.parse_binary_expression(precedence);
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }
        left
    }

    fn parse_unary_expression(&mut self) -> Expression {
        let operator = match self.token() {
            SyntaxKind::PlusToken => UnaryOperator::Plus,
            SyntaxKind::MinusToken => UnaryOperator::Minus,
            SyntaxKind::ExclamationToken => UnaryOperator::Not,
            SyntaxKind::TildeToken => UnaryOperator::Complement,
            _ => return self.parse_primary_expression(),
        };
        let start = self.token_start();
        if !self.enter_recursion() {
            self.skip_argument_tail();
            return Expression::Other(self.source_slice(start, self.previous_token_end));
        }
        self.next_token();
        let operand = self.parse_unary_expression();
        self.exit_recursion();
        Expression::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    fn parse_primary_expression(&mut self) -> Expression {
        let start = self.token_start();
        match self.token() {
            SyntaxKind::StringLiteral => self.parse_string_literal(StringLiteralKind::Regular),
            SyntaxKind::VerbatimStringLiteral => {
                self.parse_string_literal(StringLiteralKind::Verbatim)
            }
            SyntaxKind::RawStringLiteral => self.parse_string_literal(StringLiteralKind::Raw),
            SyntaxKind::InterpolatedStringLiteral => {
                let text = self.token_text();
                self.next_token();
                Expression::InterpolatedString(text)
            }
            SyntaxKind::CharacterLiteral => {
                let value = self.token_value();
                self.next_token();
                Expression::Character(value)
            }
            SyntaxKind::NumericLiteral => {
                let text = self.token_text();
                self.next_token();
                Expression::Number(text)
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let value = self.is_token(SyntaxKind::TrueKeyword);
                self.next_token();
                Expression::Boolean(value)
            }
            SyntaxKind::NullKeyword => {
                self.next_token();
                Expression::Null
            }
            SyntaxKind::DefaultKeyword => {
                self.next_token();
                if self.is_token(SyntaxKind::OpenParenToken) {
                    self.skip_parenthesized();
                    Expression::Other(self.source_slice(start, self.previous_token_end))
                } else {
                    Expression::Default
                }
            }
            SyntaxKind::TypeofKeyword => {
                self.next_token();
                if !self.is_token(SyntaxKind::OpenParenToken) {
                    self.error_at_current_token(diagnostic_codes::EXPECTED, &["("]);
                    return Expression::Other(self.source_slice(start, self.previous_token_end));
                }
                let inner_start = self.token_end();
                self.skip_parenthesized();
                let inner_end = self.previous_token_end.saturating_sub(1).max(inner_start);
                Expression::TypeOf(self.source_slice(inner_start, inner_end))
            }
            SyntaxKind::Identifier
                if self.is_identifier_text("nameof")
                    && self.peek_token() == SyntaxKind::OpenParenToken =>
            {
                self.next_token();
                self.next_token();
                let operand = self.parse_expression();
                if !self.parse_expected(SyntaxKind::CloseParenToken) {
                    self.skip_argument_tail();
                    self.parse_optional(SyntaxKind::CloseParenToken);
                }
                Expression::NameOf(Box::new(operand))
            }
            SyntaxKind::Identifier => {
                let Some(name) = self.parse_qualified_name() else {
                    return Expression::Other(self.source_slice(start, self.previous_token_end));
                };
                if self.is_token(SyntaxKind::OpenParenToken) {
                    self.skip_parenthesized();
                    return Expression::Other(self.source_slice(start, self.previous_token_end));
                }
                Expression::Name(name)
            }
            SyntaxKind::OpenParenToken => self.parse_parenthesized_or_cast(),
            SyntaxKind::CommaToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::EndOfFileToken => {
                self.error_at_current_token(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
                Expression::Other(String::new())
            }
            _ => {
                // `new`, collection expressions, predefined type member access, ...
                self.next_token();
                Expression::Other(self.source_slice(start, self.previous_token_end))
            }
        }
    }

    fn parse_string_literal(&mut self, kind: StringLiteralKind) -> Expression {
        let value = self.token_value();
        self.next_token();
        Expression::String { value, kind }
    }

    fn parse_parenthesized_or_cast(&mut self) -> Expression {
        let start = self.token_start();
        if !self.enter_recursion() {
            self.skip_parenthesized();
            return Expression::Other(self.source_slice(start, self.previous_token_end));
        }
        self.next_token();
        let inner_start = self.token_start();
        let inner = self.parse_expression();
        let inner_end = self.previous_token_end;
        if !self.parse_expected(SyntaxKind::CloseParenToken) {
            self.exit_recursion();
            return inner;
        }

        let expression = if self.is_start_of_cast_operand() {
            let target = self.source_slice(inner_start, inner_end);
            let operand = self.parse_unary_expression();
            Expression::Cast {
                target,
                operand: Box::new(operand),
            }
        } else {
            Expression::Parenthesized(Box::new(inner))
        };
        self.exit_recursion();
        expression
    }

    /// A token that can begin the operand of a cast: `(T)x`.
    fn is_start_of_cast_operand(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::Identifier
                | SyntaxKind::NumericLiteral
                | SyntaxKind::CharacterLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::VerbatimStringLiteral
                | SyntaxKind::RawStringLiteral
                | SyntaxKind::InterpolatedStringLiteral
                | SyntaxKind::OpenParenToken
                | SyntaxKind::TildeToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::TypeofKeyword
                | SyntaxKind::ThisKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::OtherKeyword
        )
    }

    /// Consume a balanced `( ... )` group starting at the current `(`.
    fn skip_parenthesized(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::OpenParenToken => depth += 1,
                SyntaxKind::CloseParenToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.next_token();
                        return;
                    }
                }
                _ => {}
            }
            self.next_token();
        }
    }

    fn source_slice(&self, start: u32, end: u32) -> String {
        Span::new(start, end.max(start))
            .slice(self.source_text())
            .trim()
            .to_string()
    }
}

/// Binary operator and its precedence; higher binds tighter.
const fn binary_operator(kind: SyntaxKind) -> Option<(BinaryOperator, u8)> {
    let entry = match kind {
        SyntaxKind::AsteriskToken => (BinaryOperator::Multiply, 5),
        SyntaxKind::SlashToken => (BinaryOperator::Divide, 5),
        SyntaxKind::PercentToken => (BinaryOperator::Remainder, 5),
        SyntaxKind::PlusToken => (BinaryOperator::Add, 4),
        SyntaxKind::MinusToken => (BinaryOperator::Subtract, 4),
        SyntaxKind::AmpersandToken => (BinaryOperator::BitwiseAnd, 3),
        SyntaxKind::CaretToken => (BinaryOperator::ExclusiveOr, 2),
        SyntaxKind::BarToken => (BinaryOperator::BitwiseOr, 1),
        _ => return None,
    };
    Some(entry)
}
