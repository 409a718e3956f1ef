use std::{env, fs, path::PathBuf};

fn main() {
  let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());

  println!("cargo:rerun-if-changed=memory.x");
  fs::write(out.join("memory.x"), include_bytes!("memory.x")).unwrap();

  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rustc-link-search={}", out.display());
}
