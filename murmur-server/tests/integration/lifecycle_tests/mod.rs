mod test_dead_transport;
mod test_overflow_policy;
