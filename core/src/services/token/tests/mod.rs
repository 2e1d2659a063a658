mod rs256_tests;
