mod turn_processor_tests;
mod wiring_tests;
