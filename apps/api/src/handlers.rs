pub mod health;
pub mod leaves;
pub mod requests;
pub mod shifts;
pub mod swaps;

#[cfg(test)]
mod tests;
