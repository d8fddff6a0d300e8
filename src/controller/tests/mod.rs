mod gesture_tests;
