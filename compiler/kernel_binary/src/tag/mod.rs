//! Node-kind tags.
//!
//! Every node in the kernel format starts with a one-byte tag. Discriminants
//! are wire values assigned by the producing compiler and must match it bit
//! for bit; gaps are unassigned.
//!
//! # Specialized Tags
//!
//! A byte with the high bit (`0x80`) set is specialized: the top five bits
//! (`byte & 0xF8`) are the coarse tag and the low three bits (`byte & 0x07`)
//! are an inline payload. This saves a follow-up uint read for two frequent
//! cases:
//!
//! - local variable slots 0..=7 ([`Tag::SpecializedVariableGet`],
//!   [`Tag::SpecializedVariableSet`])
//! - small integer literals -3..=4 ([`Tag::SpecialIntLiteral`], payload
//!   minus [`SPECIALIZED_INT_LITERAL_BIAS`])

/// High bit marking a specialized tag byte.
pub const SPECIALIZED_TAG_HIGH_BIT: u8 = 0x80;

/// Mask selecting the coarse tag of a specialized byte.
pub const SPECIALIZED_TAG_MASK: u8 = 0xF8;

/// Mask selecting the inline payload of a specialized byte.
pub const SPECIALIZED_PAYLOAD_MASK: u8 = 0x07;

/// Bias subtracted from a [`Tag::SpecialIntLiteral`] payload.
pub const SPECIALIZED_INT_LITERAL_BIAS: i32 = 3;

/// Node kind, by wire value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Tag {
    // === Framing: 0-1 ===
    Nothing = 0,
    Something = 1,

    // === Declarations: 2-6 ===
    Class = 2,
    FunctionNode = 3,
    Field = 4,
    Constructor = 5,
    Procedure = 6,

    // === Initializers: 7-11 ===
    InvalidInitializer = 7,
    FieldInitializer = 8,
    SuperInitializer = 9,
    RedirectingInitializer = 10,
    LocalInitializer = 11,

    // === Expressions: 15-59 ===
    DirectPropertyGet = 15,
    DirectPropertySet = 16,
    DirectMethodInvocation = 17,
    ConstStaticInvocation = 18,
    InvalidExpression = 19,
    VariableGet = 20,
    VariableSet = 21,
    PropertyGet = 22,
    PropertySet = 23,
    SuperPropertyGet = 24,
    SuperPropertySet = 25,
    StaticGet = 26,
    StaticSet = 27,
    MethodInvocation = 28,
    SuperMethodInvocation = 29,
    StaticInvocation = 30,
    ConstructorInvocation = 31,
    ConstConstructorInvocation = 32,
    Not = 33,
    LogicalExpression = 34,
    ConditionalExpression = 35,
    StringConcatenation = 36,
    IsExpression = 37,
    AsExpression = 38,
    StringLiteral = 39,
    DoubleLiteral = 40,
    TrueLiteral = 41,
    FalseLiteral = 42,
    NullLiteral = 43,
    SymbolLiteral = 44,
    TypeLiteral = 45,
    ThisExpression = 46,
    Rethrow = 47,
    Throw = 48,
    ListLiteral = 49,
    MapLiteral = 50,
    AwaitExpression = 51,
    FunctionExpression = 52,
    Let = 53,
    PositiveIntLiteral = 55,
    NegativeIntLiteral = 56,
    BigIntLiteral = 57,
    ConstListLiteral = 58,
    ConstMapLiteral = 59,

    // === Statements: 60-80 ===
    InvalidStatement = 60,
    ExpressionStatement = 61,
    Block = 62,
    EmptyStatement = 63,
    AssertStatement = 64,
    LabeledStatement = 65,
    BreakStatement = 66,
    WhileStatement = 67,
    DoStatement = 68,
    ForStatement = 69,
    ForInStatement = 70,
    SwitchStatement = 71,
    ContinueSwitchStatement = 72,
    IfStatement = 73,
    ReturnStatement = 74,
    TryCatch = 75,
    TryFinally = 76,
    YieldStatement = 77,
    VariableDeclaration = 78,
    FunctionDeclaration = 79,
    AsyncForInStatement = 80,

    // === Types: 87-97 ===
    TypedefType = 87,
    VectorType = 88,
    BottomType = 89,
    InvalidType = 90,
    DynamicType = 91,
    VoidType = 92,
    InterfaceType = 93,
    FunctionType = 94,
    TypeParameterType = 95,
    SimpleInterfaceType = 96,
    SimpleFunctionType = 97,

    // === Vectors and closures: 102-106 ===
    VectorCreation = 102,
    VectorGet = 103,
    VectorSet = 104,
    VectorCopy = 105,
    ClosureCreation = 106,

    // === Specialized (coarse kinds, payload in low 3 bits): 128-144 ===
    SpecializedVariableGet = 128,
    SpecializedVariableSet = 136,
    SpecialIntLiteral = 144,
}

const _: () = assert!(size_of::<Tag>() == 1);

impl Tag {
    /// Look up the tag with wire value `byte`.
    ///
    /// `byte` is a coarse value; split specialized bytes with
    /// [`split_tag_byte`] first.
    pub const fn from_u8(byte: u8) -> Option<Tag> {
        Some(match byte {
            0 => Tag::Nothing,
            1 => Tag::Something,
            2 => Tag::Class,
            3 => Tag::FunctionNode,
            4 => Tag::Field,
            5 => Tag::Constructor,
            6 => Tag::Procedure,
            7 => Tag::InvalidInitializer,
            8 => Tag::FieldInitializer,
            9 => Tag::SuperInitializer,
            10 => Tag::RedirectingInitializer,
            11 => Tag::LocalInitializer,
            15 => Tag::DirectPropertyGet,
            16 => Tag::DirectPropertySet,
            17 => Tag::DirectMethodInvocation,
            18 => Tag::ConstStaticInvocation,
            19 => Tag::InvalidExpression,
            20 => Tag::VariableGet,
            21 => Tag::VariableSet,
            22 => Tag::PropertyGet,
            23 => Tag::PropertySet,
            24 => Tag::SuperPropertyGet,
            25 => Tag::SuperPropertySet,
            26 => Tag::StaticGet,
            27 => Tag::StaticSet,
            28 => Tag::MethodInvocation,
            29 => Tag::SuperMethodInvocation,
            30 => Tag::StaticInvocation,
            31 => Tag::ConstructorInvocation,
            32 => Tag::ConstConstructorInvocation,
            33 => Tag::Not,
            34 => Tag::LogicalExpression,
            35 => Tag::ConditionalExpression,
            36 => Tag::StringConcatenation,
            37 => Tag::IsExpression,
            38 => Tag::AsExpression,
            39 => Tag::StringLiteral,
            40 => Tag::DoubleLiteral,
            41 => Tag::TrueLiteral,
            42 => Tag::FalseLiteral,
            43 => Tag::NullLiteral,
            44 => Tag::SymbolLiteral,
            45 => Tag::TypeLiteral,
            46 => Tag::ThisExpression,
            47 => Tag::Rethrow,
            48 => Tag::Throw,
            49 => Tag::ListLiteral,
            50 => Tag::MapLiteral,
            51 => Tag::AwaitExpression,
            52 => Tag::FunctionExpression,
            53 => Tag::Let,
            55 => Tag::PositiveIntLiteral,
            56 => Tag::NegativeIntLiteral,
            57 => Tag::BigIntLiteral,
            58 => Tag::ConstListLiteral,
            59 => Tag::ConstMapLiteral,
            60 => Tag::InvalidStatement,
            61 => Tag::ExpressionStatement,
            62 => Tag::Block,
            63 => Tag::EmptyStatement,
            64 => Tag::AssertStatement,
            65 => Tag::LabeledStatement,
            66 => Tag::BreakStatement,
            67 => Tag::WhileStatement,
            68 => Tag::DoStatement,
            69 => Tag::ForStatement,
            70 => Tag::ForInStatement,
            71 => Tag::SwitchStatement,
            72 => Tag::ContinueSwitchStatement,
            73 => Tag::IfStatement,
            74 => Tag::ReturnStatement,
            75 => Tag::TryCatch,
            76 => Tag::TryFinally,
            77 => Tag::YieldStatement,
            78 => Tag::VariableDeclaration,
            79 => Tag::FunctionDeclaration,
            80 => Tag::AsyncForInStatement,
            87 => Tag::TypedefType,
            88 => Tag::VectorType,
            89 => Tag::BottomType,
            90 => Tag::InvalidType,
            91 => Tag::DynamicType,
            92 => Tag::VoidType,
            93 => Tag::InterfaceType,
            94 => Tag::FunctionType,
            95 => Tag::TypeParameterType,
            96 => Tag::SimpleInterfaceType,
            97 => Tag::SimpleFunctionType,
            102 => Tag::VectorCreation,
            103 => Tag::VectorGet,
            104 => Tag::VectorSet,
            105 => Tag::VectorCopy,
            106 => Tag::ClosureCreation,
            128 => Tag::SpecializedVariableGet,
            136 => Tag::SpecializedVariableSet,
            144 => Tag::SpecialIntLiteral,
            _ => return None,
        })
    }

    /// Wire value of this tag.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns `true` for the coarse kinds that carry an inline payload.
    #[inline]
    pub const fn is_specialized(self) -> bool {
        self.as_u8() & SPECIALIZED_TAG_HIGH_BIT != 0
    }
}

/// Split a raw tag byte into its coarse value and inline payload.
///
/// Plain bytes come back unchanged with no payload.
#[inline]
pub const fn split_tag_byte(byte: u8) -> (u8, Option<u8>) {
    if byte & SPECIALIZED_TAG_HIGH_BIT != 0 {
        (
            byte & SPECIALIZED_TAG_MASK,
            Some(byte & SPECIALIZED_PAYLOAD_MASK),
        )
    } else {
        (byte, None)
    }
}

/// Value of a [`Tag::SpecialIntLiteral`] payload.
///
/// Payloads 0..=7 map to -3..=4.
#[inline]
pub const fn specialized_int_literal(payload: u8) -> i32 {
    (payload & SPECIALIZED_PAYLOAD_MASK) as i32 - SPECIALIZED_INT_LITERAL_BIAS
}
