pub mod kayaposoft;
