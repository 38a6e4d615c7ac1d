//! Node and token kinds of the consumed Java syntax tree.

use std::fmt;

/// The kind of a syntax-tree node.
///
/// The tree follows the conventional Java AST layout. Composite shapes the
/// table maker and resolver rely on (children in order, `?` optional, `*`
/// repeated; punctuation may additionally appear anywhere and is skipped):
///
/// ```text
/// CompilationUnit  PackageDef? Import* (ClassDef | InterfaceDef)*
/// PackageDef       Annotation* (Ident | Dot) Semi
/// Import           (Ident | Dot) Semi              Dot may end in Star
/// ClassDef         Modifiers ClassKw Ident ExtendsClause? ImplementsClause? ObjBlock
/// InterfaceDef     Modifiers InterfaceKw Ident ExtendsClause? ObjBlock
/// ExtendsClause    (Ident | Dot) (Comma (Ident | Dot))*
/// ObjBlock         LCurly member* RCurly
/// MethodDef        Modifiers Type Ident LParen Parameters RParen ThrowsClause? (Slist | Semi)
/// CtorDef          Modifiers Ident LParen Parameters RParen ThrowsClause? Slist
/// ParameterDef     Modifiers Type Ident
/// VariableDef      Modifiers Type Ident Assign? Semi?   Assign holds Expr or ArrayInit
/// Type             Ident | Dot | primitive keyword | ArrayDeclarator
/// ArrayDeclarator  (type node) RBrack                  in a Type
/// ArrayDeclarator  Expr? RBrack                        in `new T[..]`
/// Slist            statement* RCurly?
/// If               IfKw? LParen Expr RParen stmt Else?
/// Else             stmt | If
/// For              LParen (ForInit Semi ForCondition Semi ForIterator | ForEachClause) RParen stmt
/// ForEachClause    VariableDef Colon Expr
/// While            LParen Expr RParen stmt
/// Do               stmt LParen Expr RParen Semi
/// Switch           LParen Expr RParen LCurly CaseGroup* RCurly
/// CaseGroup        (Case | Default)* Slist
/// Try              Slist Catch* Finally?
/// Catch            LParen ParameterDef RParen Slist
/// Labeled          Ident stmt
/// MethodCall       (Ident | Dot | This | Super) Elist RParen
/// New              (Ident | Dot | primitive) (LParen Elist RParen ObjBlock? | ArrayDeclarator+ ArrayInit?)
/// CtorCall         LParen Elist RParen Semi           `this(...)`; SuperCtorCall alike
/// Dot              lhs rhs                           rhs: Ident | ClassKw | This | New
/// IndexOp          array Expr RBrack
/// TypeCast         LParen Type RParen expr
/// Question         cond then Colon else
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum SyntaxKind {
    // ===== structure =====
    CompilationUnit,
    PackageDef,
    Import,
    ClassDef,
    InterfaceDef,
    ObjBlock,
    ExtendsClause,
    ImplementsClause,
    ThrowsClause,
    Modifiers,
    Modifier,
    Annotation,
    TypeArguments,
    MethodDef,
    CtorDef,
    Parameters,
    ParameterDef,
    VariableDef,
    Type,
    ArrayDeclarator,
    StaticInit,
    InstanceInit,

    // ===== statements =====
    Slist,
    Expr,
    Elist,
    EmptyStat,
    If,
    Else,
    For,
    ForInit,
    ForCondition,
    ForIterator,
    ForEachClause,
    While,
    Do,
    Switch,
    CaseGroup,
    Case,
    Default,
    Try,
    Catch,
    Finally,
    Synchronized,
    Labeled,
    Return,
    Break,
    Continue,
    Throw,
    Assert,
    CtorCall,
    SuperCtorCall,

    // ===== expressions =====
    Ident,
    Dot,
    MethodCall,
    New,
    IndexOp,
    TypeCast,
    InstanceOf,
    Question,
    ArrayInit,
    This,
    Super,

    // ===== operators =====
    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    DivAssign,
    ModAssign,
    ShlAssign,
    ShrAssign,
    BsrAssign,
    BandAssign,
    BorAssign,
    BxorAssign,
    Plus,
    Minus,
    Star,
    Div,
    Mod,
    Shl,
    Shr,
    Bsr,
    Band,
    Bor,
    Bxor,
    Land,
    Lor,
    Lt,
    Gt,
    Le,
    Ge,
    Equal,
    NotEqual,
    UnaryPlus,
    UnaryMinus,
    Inc,
    Dec,
    PostInc,
    PostDec,
    Bnot,
    Lnot,

    // ===== literals =====
    NumInt,
    NumLong,
    NumFloat,
    NumDouble,
    CharLiteral,
    StringLiteral,
    True,
    False,
    Null,

    // ===== primitive keywords =====
    VoidKw,
    BooleanKw,
    ByteKw,
    CharKw,
    ShortKw,
    IntKw,
    LongKw,
    FloatKw,
    DoubleKw,

    // ===== other keywords =====
    ClassKw,
    InterfaceKw,
    IfKw,

    // ===== punctuation =====
    LParen,
    RParen,
    LCurly,
    RCurly,
    LBrack,
    RBrack,
    Semi,
    Comma,
    Colon,
    At,
}

impl SyntaxKind {
    /// Punctuation tokens carry no meaning for resolution.
    pub fn is_punct(self) -> bool {
        matches!(
            self,
            Self::LParen
                | Self::RParen
                | Self::LCurly
                | Self::RCurly
                | Self::LBrack
                | Self::RBrack
                | Self::Semi
                | Self::Comma
                | Self::Colon
                | Self::At
        )
    }

    /// `void` and the eight primitive type keywords.
    pub fn is_primitive_keyword(self) -> bool {
        matches!(
            self,
            Self::VoidKw
                | Self::BooleanKw
                | Self::ByteKw
                | Self::CharKw
                | Self::ShortKw
                | Self::IntKw
                | Self::LongKw
                | Self::FloatKw
                | Self::DoubleKw
        )
    }

    /// Class-like declarations that open a class scope.
    pub fn is_type_decl(self) -> bool {
        matches!(self, Self::ClassDef | Self::InterfaceDef)
    }

    /// Plain and compound assignment operators.
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            Self::Assign
                | Self::PlusAssign
                | Self::MinusAssign
                | Self::StarAssign
                | Self::DivAssign
                | Self::ModAssign
                | Self::ShlAssign
                | Self::ShrAssign
                | Self::BsrAssign
                | Self::BandAssign
                | Self::BorAssign
                | Self::BxorAssign
        )
    }

    /// Operators producing `boolean` from two operands.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Land
                | Self::Lor
                | Self::Lt
                | Self::Gt
                | Self::Le
                | Self::Ge
                | Self::Equal
                | Self::NotEqual
        )
    }

    /// Binary operators subject to numeric promotion.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Plus
                | Self::Minus
                | Self::Star
                | Self::Div
                | Self::Mod
                | Self::Band
                | Self::Bor
                | Self::Bxor
        )
    }

    pub fn is_shift(self) -> bool {
        matches!(self, Self::Shl | Self::Shr | Self::Bsr)
    }

    /// Unary operators whose type is the operand type.
    pub fn is_unary(self) -> bool {
        matches!(
            self,
            Self::UnaryPlus
                | Self::UnaryMinus
                | Self::Inc
                | Self::Dec
                | Self::PostInc
                | Self::PostDec
        )
    }

    /// Statements and declarations that the resolver handles through their
    /// own definition or block rather than as expressions.
    pub fn is_structural_statement(self) -> bool {
        matches!(
            self,
            Self::VariableDef
                | Self::MethodDef
                | Self::CtorDef
                | Self::ClassDef
                | Self::InterfaceDef
                | Self::For
                | Self::While
                | Self::If
                | Self::Do
                | Self::Switch
                | Self::Synchronized
                | Self::Try
                | Self::Catch
                | Self::Finally
                | Self::Labeled
                | Self::Slist
                | Self::Assert
                | Self::StaticInit
                | Self::InstanceInit
                | Self::EmptyStat
                | Self::Modifiers
                | Self::Modifier
                | Self::VoidKw
        )
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classes_are_disjoint() {
        let all = [
            SyntaxKind::Plus,
            SyntaxKind::Assign,
            SyntaxKind::Lt,
            SyntaxKind::Shl,
            SyntaxKind::Inc,
        ];
        for kind in all {
            let hits = [
                kind.is_arithmetic(),
                kind.is_assignment(),
                kind.is_comparison(),
                kind.is_shift(),
                kind.is_unary(),
            ]
            .iter()
            .filter(|hit| **hit)
            .count();
            assert_eq!(hits, 1, "{kind} belongs to exactly one operator class");
        }
    }

    #[test]
    fn test_punct_and_primitives() {
        assert!(SyntaxKind::Semi.is_punct());
        assert!(!SyntaxKind::Ident.is_punct());
        assert!(SyntaxKind::IntKw.is_primitive_keyword());
        assert!(!SyntaxKind::Ident.is_primitive_keyword());
        assert!(SyntaxKind::InterfaceDef.is_type_decl());
    }
}
