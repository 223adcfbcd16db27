pub mod batch;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod filtering;
pub mod lang;
pub mod normalize;
pub mod rules;
pub mod tokenizing;
pub mod translate;
pub mod truecasing;
