use treefs_kit::{FsBackend, TreeFS};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // an empty tree: just the root directory, CWD at `/`
    let mut fs = TreeFS::new();

    fs.mkdir("usr")?;
    fs.mkdir("usr/share")?;
    fs.mkdir("usr/local")?;

    // relative navigation moves the CWD...
    fs.cd("usr/local")?;
    println!("changed dir to: {}", fs.cwd());

    // ...and excess `..` segments clamp at the root instead of failing
    fs.cd("../../../")?;
    println!("changed dir to: {}", fs.cwd());

    // files carry owned bytes; reads hand back a copy
    fs.mkfile("kernel", b"hello")?;
    println!("kernel says: {}", String::from_utf8(fs.read("kernel")?)?);

    // a nested file, created relative to the CWD, read via absolute path
    fs.mkfile("usr/share/testing", b"testing root files")?;
    println!("read back: {}", String::from_utf8(fs.read("/usr/share/testing")?)?);

    // editing replaces the content; name and path stay put
    fs.write("kernel", b"hey again!")?;
    println!("kernel now says: {}", String::from_utf8(fs.read("kernel")?)?);

    for (name, entry) in fs.ls("usr")? {
        println!("{name} - {entry:?}");
    }

    // deleting a directory takes everything below it along
    fs.rmdir("/usr/share")?;
    assert!(!fs.exists("/usr/share/testing"));

    fs.rmfile("kernel")?;
    println!("back to: {}", fs.cwd());

    Ok(())
}
