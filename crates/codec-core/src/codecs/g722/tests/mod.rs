//! G.722 Test Modules
