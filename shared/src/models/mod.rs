// Wire models yang dipakai bersama server dan client
pub mod chat;
