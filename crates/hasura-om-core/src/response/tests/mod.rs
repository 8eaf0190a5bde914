mod flattener_tests;
