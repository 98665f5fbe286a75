//! Workspace-level integration tests and benchmarks for registrar.
