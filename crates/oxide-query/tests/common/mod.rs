#![allow(dead_code)]

use oxide_query::{CompileError, Compiler, Dialect, Query, SqlResult, SqlValue};

pub fn compile(query: Query) -> SqlResult {
    compile_with(&Compiler::default(), query)
}

pub fn compile_with(compiler: &Compiler, mut query: Query) -> SqlResult {
    compiler
        .compile(&mut query)
        .unwrap_or_else(|e| panic!("Failed to compile {query:?}\nError: {e}"))
}

pub fn compile_in(dialect: impl Dialect + 'static, query: Query) -> SqlResult {
    compile_with(&Compiler::new(dialect), query)
}

pub fn compile_err(mut query: Query) -> CompileError {
    Compiler::default()
        .compile(&mut query)
        .expect_err("Expected compile error")
}

pub fn ints(values: &[i64]) -> Vec<SqlValue> {
    values.iter().copied().map(SqlValue::Int).collect()
}
