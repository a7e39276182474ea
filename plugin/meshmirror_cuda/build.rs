use cuda_builder::CudaBuilder;

fn main() {
    println!("cargo:rerun-if-changed=kernels");
    CudaBuilder::new("kernels")
        .copy_to(format!("{}/kernels.ptx", std::env::var("OUT_DIR").unwrap()))
        .build()
        .unwrap();
}
