pub mod backfill_bank;
pub mod offline_bank;
pub mod quiz_prompt;
