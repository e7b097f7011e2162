//! C# sources shared by the integration tests.

pub const SANITY: &str = r#"
                        class C1
                        {
                            public void M1 () { }
                        }"#;

pub const BASIC_LINKING: &str = r#"
                    class C1
                    {
                        public void Method1()
                        {
                            Method2();
                        }
                        public void Method2()
                        {
                            Method1();
                        }
                    }"#;

pub const PARAMETERS: &str = r#"
                    class C1
                    {
                        public void M1(string p1, int p2, C1 p3)
                        {
                            p1 = null;
                            p2 = 0;
                            p3 = null;   
                        }
                    }"#;

/// The first two statements are missing their semicolons.
pub const LOCALS: &str = r#"
                    class C1
                    {
                        public void M1()
                        {
                            string l1 = "hello"
                            l1 = l1 + " world"

                            int l2 = 0;
                            l2 = l2 + 1;
                        }
                    }"#;

pub const EXTENSION_METHODS: &str = r#"
                    public static class MyExtensions
                    {
                        public string ExtensionMethod(this string myParam)
                        {
                        }
                    }

                    class MyClass
                    {
                        public void MyMethod()
                        {
                            "string".ExtensionMethod();
                        }
                    }
                   "#;

pub const OVERLOADS: &str = r#"
namespace Shop
{
    class Order
    {
        public void Add(int quantity) { }
        public void Add(string sku) { }
        public void Add(string sku, int quantity) { }

        public void Fill()
        {
            Add(1);
            Add("A-1");
            Add("A-2", 3);
            Add(null);
        }
    }
}"#;

pub const SCOPING: &str = r#"
class C1
{
    void First(int value)
    {
        int count = value;
        count = count + 1;
    }

    void Second(int value)
    {
        int count = value * 2;
    }
}"#;
