#![cfg(test)]
mod agenda;
