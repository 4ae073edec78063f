pub(crate) mod repl;
