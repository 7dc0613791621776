mod record_mapper_tests;
