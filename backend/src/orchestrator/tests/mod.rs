mod test_clock_driven;
