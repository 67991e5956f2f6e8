mod test_signaling_relay;
