mod config;
mod frame_loop;
mod handlers;
mod held_key_guard;
mod injector;
mod support;
