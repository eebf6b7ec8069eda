mod chat_tests;
mod common;
mod model_slot_tests;
