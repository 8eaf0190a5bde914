mod argument_binder_tests;
mod nested_arguments_tests;
