#![doc = include_str!("../../../README.md")]

mod arena;
mod ast;
mod context;
mod evaluate;
mod io;
mod limits;
mod object;
mod parser;
mod run;
mod scanner;
mod token;
mod value;

pub use crate::{
    arena::{Arena, NodeId, StrId},
    ast::{BinaryOp, Node, UnaryOp},
    context::{Context, FunctionDef},
    evaluate::interpret,
    io::{CollectStringPrint, NoPrint, PrintWriter, StdPrint},
    limits::{Limits, ResourceError, RunResult},
    object::ScriptObject,
    parser::parse,
    run::Executor,
    scanner::tokenize,
    token::{Token, TokenKind},
    value::Value,
};
