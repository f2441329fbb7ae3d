//! Domain constants
//!
//! Reserved keys of the override map and the separators used when parsing
//! identifiers and rendering diagnostic trails.

/// Separator between the class and member parts of a method identifier
pub const METHOD_SEPARATOR: &str = "::";

/// Override key supplying (or constraining) the receiver of an instance method
pub const OBJECT_KEY: &str = "$object";

/// Prefix of a per-parameter override bucket (`"$" + parameter name`)
pub const BUCKET_PREFIX: &str = "$";

/// Member name under which constructor parameters are cached and reported
pub const CONSTRUCTOR_MEMBER: &str = "new";

/// Separator used when rendering a resolve trail
pub const TRAIL_SEPARATOR: &str = " > ";

/// Default bound on resolve stack depth
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Builtin (non-class) type names; parameters typed only with these are scalar
pub const BUILTIN_TYPES: &[&str] = &[
    "bool", "int", "float", "string", "array", "list", "map", "mixed", "callable", "iterable",
    "object", "null",
];

/// Builtin type names that admit `null`
pub const NULLABLE_BUILTIN_TYPES: &[&str] = &["mixed", "null"];
