mod grammar;
mod policy;
