use thiserror::Error;

/// Errors that abort the migration of one file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MigrateError {
    /// The file is not valid source.
    #[error("failed to parse `{file}`: {message}")]
    Parse {
        /// The name the file was parsed under.
        file: String,

        /// What the parser reported.
        message: String,
    },

    /// A usage expression has no field name in it.
    #[error("fail to analyze property name: {0}")]
    MalformedUsageExpression(String),

    /// The resolver could not type a usage site.
    #[error(transparent)]
    TypeResolution(#[from] ResolveError),
}

/// Errors raised by a [`crate::resolve::TypeResolver`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// The expression, as printed, has no type the resolver knows of.
    #[error("cannot resolve the type of `{0}`")]
    Unresolvable(String),

    /// The resolver itself failed.
    #[error("type resolution failed: {0}")]
    Failed(String),
}

/// Heritage shapes the splice engine leaves alone. The class is passed through unmodified.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedHeritage {
    /// `class A {}`
    #[error("class has no heritage clause")]
    NoClause,

    /// More than one clause, ie `extends B implements C`. Holds the number of clauses.
    #[error("class has {0} heritage clauses")]
    MultipleClauses(usize),

    /// A clause naming no type.
    #[error("heritage clause has no base type")]
    EmptyClause,

    /// The only clause is `implements`.
    #[error("heritage clause is not an `extends` clause")]
    NotExtends,
}

/// The result of a migration step.
pub type MigrateResult<T> = Result<T, MigrateError>;
