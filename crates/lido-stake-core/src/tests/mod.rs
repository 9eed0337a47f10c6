mod form_tests;
