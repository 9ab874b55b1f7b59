//! Cache hierarchy unit tests.
