mod test_resolver;
