mod test_path_queries;
