use xpath_test_harness::script_engine_test;

script_engine_test!(xml_dom_xpath_native, "native");
