//! Static template fast path for high-frequency code requests.
//!
//! Checked before any live completion call. A hit skips the backend
//! entirely; this is a latency optimization only, and the template
//! set is deliberately tiny.

const FIBONACCI_CPP: &str = r#"Here's a C++ program for Fibonacci sequence:

```cpp
#include <iostream>
using namespace std;

int fibonacci(int n) {
    if (n <= 1)
        return n;
    return fibonacci(n - 1) + fibonacci(n - 2);
}

// Iterative version (more efficient)
int fibonacciIterative(int n) {
    if (n <= 1) return n;

    int a = 0, b = 1, c;
    for (int i = 2; i <= n; i++) {
        c = a + b;
        a = b;
        b = c;
    }
    return b;
}

int main() {
    int n;
    cout << "Enter number of terms: ";
    cin >> n;

    cout << "Fibonacci sequence: ";
    for (int i = 0; i < n; i++) {
        cout << fibonacciIterative(i) << " ";
    }
    cout << endl;

    return 0;
}
```

This program includes both recursive and iterative versions of Fibonacci calculation. The iterative version is more efficient for larger numbers."#;

const FIBONACCI_PYTHON: &str = r#"Here's a Python program for Fibonacci sequence:

```python
def fibonacci_recursive(n):
    if n <= 1:
        return n
    return fibonacci_recursive(n-1) + fibonacci_recursive(n-2)

def fibonacci_iterative(n):
    if n <= 1:
        return n

    a, b = 0, 1
    for _ in range(2, n + 1):
        a, b = b, a + b
    return b

def fibonacci_sequence(n):
    return [fibonacci_iterative(i) for i in range(n)]

# Main program
if __name__ == "__main__":
    n = int(input("Enter number of terms: "))

    print("Fibonacci sequence:")
    sequence = fibonacci_sequence(n)
    print(" ".join(map(str, sequence)))

    print(f"\nThe {n}th Fibonacci number is: {fibonacci_iterative(n)}")
```"#;

/// Match a user request against the static code templates.
///
/// Returns None for anything outside the template set; the caller
/// then proceeds with a live completion.
pub fn quick_code_template(request: &str) -> Option<String> {
    let lower = request.to_lowercase();

    // "fabonaci" is a misspelling seen often enough to be worth
    // matching.
    if lower.contains("fibonacci") || lower.contains("fabonaci") {
        if lower.contains("cpp") || lower.contains("c++") {
            return Some(FIBONACCI_CPP.to_string());
        }
        if lower.contains("python") {
            return Some(FIBONACCI_PYTHON.to_string());
        }
    }

    None
}
